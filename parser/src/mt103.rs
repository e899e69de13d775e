mod utils;

use crate::error::ParseError;
use crate::model::{MessageHeader, ParsedMessage, RawField, Transaction};
use std::io::{BufReader, Read};
use utils::*;

/// Допустимые коды операции для :23B:
const BANK_OPERATION_CODES: [&str; 5] = ["CRED", "CRTS", "SPAY", "SPRI", "SSTD"];

/// Допустимые значения для :71A: (кто платит комиссию)
const CHARGE_BEARER_CODES: [&str; 3] = ["BEN", "OUR", "SHA"];

/// Разбирает одно сообщение MT103 из строки.
///
/// Никогда не падает: любой дефект входа превращается в запись в
/// [`ParsedMessage::errors`], а всё, что удалось извлечь до и после
/// дефекта, остаётся в результате. Повторный тег перезаписывает
/// значение в транзакции (последний выигрывает), но в
/// [`ParsedMessage::raw_fields`] сохраняются все вхождения.
pub fn parse_message(text: &str) -> ParsedMessage {
    let mut result = ParsedMessage {
        header: None,
        transaction: Transaction::default(),
        valid: true,
        errors: Vec::new(),
        raw_fields: Vec::new(),
    };

    // единая верхняя граница: внутренняя ошибка - это ещё одна запись
    // в errors, а не паника и не Err наружу
    if let Err(err) = parse_inner(text, &mut result) {
        result.errors.push(format!("Parse error: {err}"));
        result.valid = false;
    }

    result
}

fn parse_inner(text: &str, result: &mut ParsedMessage) -> Result<(), ParseError> {
    let blocks = extract_blocks(text);

    if blocks.block1.is_some() || blocks.block2.is_some() {
        result.header = Some(MessageHeader {
            basic_header: blocks.block1,
            application_header: blocks.block2,
        });
    }

    // без блока 4 разбирать нечего; заголовки при этом сохраняем
    let Some(block4) = blocks.block4 else {
        result.errors.push("Missing Block 4 (transaction data)".to_string());
        result.valid = false;
        return Ok(());
    };

    // raw_fields заполняем до применения валидаторов, чтобы сырой
    // вывод токенизатора сохранился даже при внутренней ошибке
    result.raw_fields = extract_fields(&block4);

    for idx in 0..result.raw_fields.len() {
        let field = result.raw_fields[idx].clone();
        apply_field(&field, result)?;
    }

    check_required_fields(result);

    Ok(())
}

/// Применяет одно сырое поле к накапливаемой транзакции.
///
/// Значение записывается всегда, даже если валидация не прошла, -
/// ошибка лишь добавляется в общий список.
fn apply_field(field: &RawField, result: &mut ParsedMessage) -> Result<(), ParseError> {
    let value = field.value.as_str();

    match field.tag.as_str() {
        "20" => {
            result.transaction.reference = Some(value.to_string());
            if value.chars().count() > 16 {
                result
                    .errors
                    .push("Field :20: exceeds max length of 16 characters".to_string());
                result.valid = false;
            }
        }
        "23B" => {
            result.transaction.bank_operation_code = Some(value.to_string());
            if !BANK_OPERATION_CODES.contains(&value) {
                result.errors.push(format!(
                    "Field :23B: invalid code '{value}'. Must be one of: {}",
                    BANK_OPERATION_CODES.join(", ")
                ));
                result.valid = false;
            }
        }
        "32A" => {
            apply_32a(value, result)?;
        }
        "50K" => {
            result.transaction.ordering_customer = Some(parse_customer_field(value));
        }
        "59" => {
            result.transaction.beneficiary = Some(parse_customer_field(value));
        }
        "70" => {
            result.transaction.remittance_info = value
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect();
        }
        "71A" => {
            result.transaction.charge_bearer = Some(value.to_string());
            if !CHARGE_BEARER_CODES.contains(&value) {
                result.errors.push(format!(
                    "Field :71A: invalid value '{value}'. Must be one of: {}",
                    CHARGE_BEARER_CODES.join(", ")
                ));
                result.valid = false;
            }
        }
        other => {
            result
                .transaction
                .extra_fields
                .insert(format!("field_{other}"), value.to_string());
        }
    }

    Ok(())
}

/// Разбирает :32A: - дата валютирования, валюта и сумма одной строкой.
///
/// Формат: YYMMDDCCCAMOUNT, например "231205USD10000,00".
fn apply_32a(value: &str, result: &mut ParsedMessage) -> Result<(), ParseError> {
    let Some((date, currency, amount)) = split_32a(value) else {
        result.errors.push(format!(
            "Field :32A: invalid format. Expected YYMMDDCCCAMOUNT, got '{value}'"
        ));
        result.valid = false;
        return Ok(());
    };

    let (year, month, day) = split_yy_mm_dd(date)?;

    // месяц и день проверяются независимо: обе ошибки могут попасть
    // в список одновременно; пересечения с длиной месяца не проверяем
    if !(1..=12).contains(&month) {
        result.errors.push(format!("Field :32A: invalid month '{month}'"));
        result.valid = false;
    }
    if !(1..=31).contains(&day) {
        result.errors.push(format!("Field :32A: invalid day '{day}'"));
        result.valid = false;
    }

    // век всегда 20xx, двухзначный год из файла
    result.transaction.value_date = Some(format!("20{year:02}-{month:02}-{day:02}"));
    result.transaction.currency = Some(currency.to_string());

    // в SWIFT десятичный разделитель - запятая; меняем только первую
    result.transaction.amount = Some(amount.replacen(',', ".", 1));

    Ok(())
}

/// Обязательные атрибуты MT103; ключи - как в JSON-выводе.
///
/// Пустая строка считается отсутствующим значением; присутствующий,
/// но пустой участник (:50K:/:59: без строк) - присутствующим.
fn check_required_fields(result: &mut ParsedMessage) {
    let tx = &result.transaction;

    let checks = [
        ("reference", is_blank(&tx.reference)),
        ("bankOperationCode", is_blank(&tx.bank_operation_code)),
        ("valueDate", is_blank(&tx.value_date)),
        ("currency", is_blank(&tx.currency)),
        ("amount", is_blank(&tx.amount)),
        ("orderingCustomer", tx.ordering_customer.is_none()),
        ("beneficiary", tx.beneficiary.is_none()),
        ("chargeBearer", is_blank(&tx.charge_bearer)),
    ];

    for (key, missing) in checks {
        if missing {
            result.errors.push(format!("Missing required field: {key}"));
            result.valid = false;
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Структура с результатом разбора одного сообщения MT103.
///
/// Для парсинга из произвольного reader используйте [`Mt103Data::parse`];
/// для разбора строки достаточно [`parse_message`].
///
/// Пример:
/// ```rust,no_run
/// use std::io::Cursor;
/// use parser::Mt103Data;
/// # use parser::ParseError;
/// # fn main() -> Result<(), ParseError> {
/// let reader = Cursor::new(b"{4:\n:20:REF1\n-}");
/// let data = Mt103Data::parse(reader)?;
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Mt103Data {
    /// Пока одно сообщение на вход
    pub message: ParsedMessage,
}

impl Mt103Data {
    /// Читает вход целиком и разбирает его как одно сообщение MT103.
    ///
    /// [`ParseError`] возвращается только на ошибке чтения; проблемы
    /// самого сообщения оказываются в [`ParsedMessage::errors`].
    pub fn parse<R: Read>(reader: R) -> Result<Self, ParseError> {
        let mut buf_reader = BufReader::new(reader);
        let mut text = String::new();
        buf_reader.read_to_string(&mut text)?;

        Ok(Mt103Data {
            message: parse_message(&text),
        })
    }
}
