use std::{error::Error, fmt, io::Error as IoError};

/// Ошибки уровня библиотеки (ввод-вывод, сериализация).
///
/// Важно: проблемы валидации отдельных полей сообщения сюда НЕ попадают.
/// Парсер никогда не прерывается на плохом поле - такие проблемы
/// собираются строками в [`crate::ParsedMessage::errors`].
#[derive(Debug)]
pub enum ParseError {
    // обёртки

    /// обёртка std::io::Error
    Io(IoError),
    /// обёртка serde_json::Error
    Json(serde_json::Error),

    // логические ошибки

    /// очень общая ошибка плохих входных данных
    BadInput(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "io error: {e}"),
            ParseError::Json(e) => write!(f, "json error: {e}"),
            ParseError::BadInput(msg) => write!(f, "bad input: {msg}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for ParseError {
    fn from(e: IoError) -> Self {
        ParseError::Io(e)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Json(e)
    }
}
