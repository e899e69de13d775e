use std::io::Write;

use crate::error::ParseError;
use crate::model::ParsedMessage;

impl ParsedMessage {
    /// Сериализует результат разбора в JSON-строку.
    ///
    /// `pretty` включает отступы; ключи - camelCase, как в полях модели,
    /// отсутствующие значения в вывод не попадают.
    pub fn to_json(&self, pretty: bool) -> Result<String, ParseError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };

        Ok(json)
    }

    /// Пишет JSON результата разбора в переданный writer.
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> Result<(), ParseError> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_json::to_writer(writer, self)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::mt103::parse_message;
    use crate::sample::sample_message;

    #[test]
    fn to_json_uses_camel_case_keys_and_skips_absent_ones() {
        let result = parse_message(sample_message());
        let json = result.to_json(true).unwrap();

        assert!(json.contains("\"valueDate\": \"2023-12-05\""));
        assert!(json.contains("\"orderingCustomer\""));
        assert!(json.contains("\"rawFields\""));
        // у валидного сообщения нет нераспознанных тегов
        assert!(!json.contains("field_"));
    }

    #[test]
    fn to_json_flattens_unknown_tags_into_transaction() {
        let result = parse_message("{4:\n:13C:/SNDTIME/1249+0100\n-}");
        let json = result.to_json(false).unwrap();

        assert!(json.contains("\"field_13C\":\"/SNDTIME/1249+0100\""));
    }

    #[test]
    fn json_roundtrip_preserves_parsed_message() {
        let result = parse_message(sample_message());
        let json = result.to_json(true).unwrap();

        let back: crate::ParsedMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn write_json_writes_same_bytes_as_to_json() {
        let result = parse_message(sample_message());

        let mut buf: Vec<u8> = Vec::new();
        result.write_json(&mut buf, true).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), result.to_json(true).unwrap());
    }
}
