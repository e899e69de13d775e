use crate::error::ParseError;
use crate::model::{PartyInfo, RawField};
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK1_RE: Lazy<Regex> = Lazy::new(|| {
    // {1:...} - Basic Header, без вложенных скобок
    Regex::new(r"\{1:([^}]+)\}").unwrap()
});

static BLOCK2_RE: Lazy<Regex> = Lazy::new(|| {
    // {2:...} - Application Header
    Regex::new(r"\{2:([^}]+)\}").unwrap()
});

static BLOCK4_RE: Lazy<Regex> = Lazy::new(|| {
    // (?s) - '.' матчит и переводы строк
    // терминатор обычно '-}', но одиночная '}' тоже принимается
    Regex::new(r"(?s)\{4:\s*(.*?)\s*-?\}").unwrap()
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    // маркер поля: :20:, :23B:, :32A: - две цифры и необязательная
    // заглавная буква между двоеточиями
    Regex::new(r":(\d{2}[A-Z]?):").unwrap()
});

/// Структурные блоки сообщения, каждый без обрамляющих скобок.
#[derive(Debug, Default)]
pub(super) struct Blocks {
    pub block1: Option<String>,
    pub block2: Option<String>,
    pub block4: Option<String>,
}

/// Режет сообщение на структурные блоки `{N:...}`.
///
/// Блоки 1 и 2 необязательные и независимы друг от друга. Отсутствие
/// блока 4 здесь ошибкой не считается - решение об этом принимает
/// сборщик сообщения.
pub(super) fn extract_blocks(text: &str) -> Blocks {
    let mut blocks = Blocks::default();

    if let Some(caps) = BLOCK1_RE.captures(text) {
        blocks.block1 = Some(caps[1].to_string());
    }
    if let Some(caps) = BLOCK2_RE.captures(text) {
        blocks.block2 = Some(caps[1].to_string());
    }
    if let Some(caps) = BLOCK4_RE.captures(text) {
        blocks.block4 = Some(caps[1].to_string());
    }

    blocks
}

/// Выделяет из текста блока 4 упорядоченную последовательность сырых полей.
///
/// Значение поля - всё от конца его маркера до начала следующего маркера
/// (или до конца блока), с обрезанными краевыми пробелами; внутренние
/// переводы строк сохраняются - они значимы для :50K:/:59:/:70:.
/// Текст до первого маркера (по построению его быть не должно) молча
/// игнорируется.
pub(super) fn extract_fields(block4: &str) -> Vec<RawField> {
    let markers: Vec<regex::Match<'_>> = TAG_RE.find_iter(block4).collect();

    let mut fields = Vec::with_capacity(markers.len());
    for (idx, marker) in markers.iter().enumerate() {
        let value_end = markers
            .get(idx + 1)
            .map_or(block4.len(), |next| next.start());

        fields.push(RawField {
            tag: marker.as_str().trim_matches(':').to_string(),
            value: block4[marker.end()..value_end].trim().to_string(),
        });
    }

    fields
}

/// Режет значение :32A: на (дата, валюта, сумма) по фиксированной схеме
/// YYMMDDCCCAMOUNT. `None` - формат не совпал.
pub(super) fn split_32a(value: &str) -> Option<(&str, &str, &str)> {
    static RE_32A: Lazy<Regex> = Lazy::new(|| {
        // 6 цифр даты + 3 заглавные буквы валюты + цифры/запятые суммы
        Regex::new(r"^(\d{6})([A-Z]{3})([\d,]+)$").unwrap()
    });

    let caps = RE_32A.captures(value)?;
    match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(date), Some(currency), Some(amount)) => {
            Some((date.as_str(), currency.as_str(), amount.as_str()))
        }
        _ => None,
    }
}

/// Разбирает строку YYMMDD на (год, месяц, день).
///
/// Только числовой разбор, без календарной проверки - диапазоны месяца
/// и дня контролирует валидатор :32A:.
pub(super) fn split_yy_mm_dd(s: &str) -> Result<(u32, u32, u32), ParseError> {
    if s.len() != 6 {
        return Err(ParseError::BadInput(format!("invalid YYMMDD date: '{s}'")));
    }

    let yy: u32 = s[0..2]
        .parse()
        .map_err(|_| ParseError::BadInput(format!("invalid year in YYMMDD: '{s}'")))?;
    let mm: u32 = s[2..4]
        .parse()
        .map_err(|_| ParseError::BadInput(format!("invalid month in YYMMDD: '{s}'")))?;
    let dd: u32 = s[4..6]
        .parse()
        .map_err(|_| ParseError::BadInput(format!("invalid day in YYMMDD: '{s}'")))?;

    Ok((yy, mm, dd))
}

/// Разбирает многострочное поле участника (:50K:/:59:).
///
/// Строки чистятся от краевых пробелов, пустые выбрасываются. Первая
/// строка, начинающаяся с '/', - номер счёта; следующая - имя; всё
/// остальное - адрес. Пустой вход даёт пустую структуру.
pub(super) fn parse_customer_field(value: &str) -> PartyInfo {
    let lines: Vec<&str> = value
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut party = PartyInfo::default();
    let mut rest = lines.as_slice();

    if let Some(first) = rest.first() {
        if let Some(account) = first.strip_prefix('/') {
            party.account = Some(account.to_string());
            rest = &rest[1..];
        }
    }

    if let Some(name) = rest.first() {
        party.name = Some((*name).to_string());
        rest = &rest[1..];
    }

    party.address = rest.iter().map(|line| (*line).to_string()).collect();

    party
}

#[cfg(test)]
mod tests {
    use super::*;

    // extract_blocks

    #[test]
    fn extract_blocks_finds_all_three_blocks() {
        let text = "{1:BASIC}{2:APP}{4:\n:20:REF\n-}";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.block1.as_deref(), Some("BASIC"));
        assert_eq!(blocks.block2.as_deref(), Some("APP"));
        assert_eq!(blocks.block4.as_deref(), Some(":20:REF"));
    }

    #[test]
    fn extract_blocks_tolerates_missing_headers() {
        let blocks = extract_blocks("{4:\n:20:REF\n-}");

        assert!(blocks.block1.is_none());
        assert!(blocks.block2.is_none());
        assert_eq!(blocks.block4.as_deref(), Some(":20:REF"));
    }

    #[test]
    fn extract_blocks_tolerates_missing_block4() {
        let blocks = extract_blocks("{1:BASIC}");

        assert_eq!(blocks.block1.as_deref(), Some("BASIC"));
        assert!(blocks.block4.is_none());
    }

    #[test]
    fn extract_blocks_accepts_block4_without_dash_terminator() {
        let blocks = extract_blocks("{4:\n:20:REF\n}");
        assert_eq!(blocks.block4.as_deref(), Some(":20:REF"));
    }

    #[test]
    fn extract_blocks_trims_block4_edges_but_keeps_inner_newlines() {
        let blocks = extract_blocks("{4:  \n:20:REF\n:23B:CRED\n  -}");
        assert_eq!(blocks.block4.as_deref(), Some(":20:REF\n:23B:CRED"));
    }

    // extract_fields

    #[test]
    fn extract_fields_keeps_document_order() {
        let fields = extract_fields(":20:REF\n:23B:CRED\n:71A:SHA");

        let tags: Vec<&str> = fields.iter().map(|f| f.tag.as_str()).collect();
        assert_eq!(tags, vec!["20", "23B", "71A"]);
        assert_eq!(fields[0].value, "REF");
        assert_eq!(fields[1].value, "CRED");
        assert_eq!(fields[2].value, "SHA");
    }

    #[test]
    fn extract_fields_preserves_inner_newlines_of_multiline_value() {
        let fields = extract_fields(":50K:/123\nJOHN DOE\nMAIN STREET\n:71A:SHA");

        assert_eq!(fields[0].tag, "50K");
        assert_eq!(fields[0].value, "/123\nJOHN DOE\nMAIN STREET");
    }

    #[test]
    fn extract_fields_yields_entry_per_duplicate_tag() {
        let fields = extract_fields(":20:A\n:20:B");

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].value, "A");
        assert_eq!(fields[1].value, "B");
    }

    #[test]
    fn extract_fields_ignores_text_before_first_marker() {
        let fields = extract_fields("garbage\n:20:REF");

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].tag, "20");
    }

    #[test]
    fn extract_fields_on_empty_input_yields_nothing() {
        assert!(extract_fields("").is_empty());
    }

    // split_32a

    #[test]
    fn split_32a_splits_valid_value() {
        let (date, currency, amount) = split_32a("231205USD10000,00").unwrap();

        assert_eq!(date, "231205");
        assert_eq!(currency, "USD");
        assert_eq!(amount, "10000,00");
    }

    #[test]
    fn split_32a_rejects_lowercase_currency_and_short_date() {
        assert!(split_32a("231205usd10,00").is_none());
        assert!(split_32a("2312USD10,00").is_none());
        assert!(split_32a("231205USD").is_none());
        assert!(split_32a("").is_none());
    }

    // split_yy_mm_dd

    #[test]
    fn split_yy_mm_dd_splits_digits() {
        assert_eq!(split_yy_mm_dd("231205").unwrap(), (23, 12, 5));
        // календарной проверки нет - это зона валидатора
        assert_eq!(split_yy_mm_dd("991340").unwrap(), (99, 13, 40));
    }

    #[test]
    fn split_yy_mm_dd_errors_on_wrong_length() {
        let err = split_yy_mm_dd("2312").unwrap_err();
        match err {
            ParseError::BadInput(msg) => {
                assert!(msg.contains("invalid YYMMDD"), "unexpected msg: {msg}");
            }
            other => panic!("expected BadInput, got {other:?}"),
        }
    }

    // parse_customer_field

    #[test]
    fn parse_customer_field_with_account_name_and_address() {
        let party = parse_customer_field("/1234567890\nJOHN DOE\n123 MAIN STREET\nNEW YORK");

        assert_eq!(party.account.as_deref(), Some("1234567890"));
        assert_eq!(party.name.as_deref(), Some("JOHN DOE"));
        assert_eq!(party.address, vec!["123 MAIN STREET", "NEW YORK"]);
    }

    #[test]
    fn parse_customer_field_without_account_first_line_is_name() {
        let party = parse_customer_field("JOHN DOE\nMAIN STREET");

        assert!(party.account.is_none());
        assert_eq!(party.name.as_deref(), Some("JOHN DOE"));
        assert_eq!(party.address, vec!["MAIN STREET"]);
    }

    #[test]
    fn parse_customer_field_with_account_only() {
        let party = parse_customer_field("/42");

        assert_eq!(party.account.as_deref(), Some("42"));
        assert!(party.name.is_none());
        assert!(party.address.is_empty());
    }

    #[test]
    fn parse_customer_field_skips_blank_lines() {
        let party = parse_customer_field("\n/42\n\nJOHN DOE\n\n");

        assert_eq!(party.account.as_deref(), Some("42"));
        assert_eq!(party.name.as_deref(), Some("JOHN DOE"));
        assert!(party.address.is_empty());
    }

    #[test]
    fn parse_customer_field_on_empty_input_is_empty() {
        let party = parse_customer_field("");

        assert!(party.account.is_none());
        assert!(party.name.is_none());
        assert!(party.address.is_empty());
    }
}
