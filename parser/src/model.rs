use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Одно сырое поле из блока 4: тег и значение "как есть".
///
/// Порядок полей в [`ParsedMessage::raw_fields`] совпадает с порядком
/// их появления в сообщении; повторы тегов дают повторные записи.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    /// тег поля, 2-3 символа: "20", "23B", "32A", ...
    pub tag: String,
    /// значение без краевых пробелов, внутренние переводы строк сохранены
    pub value: String,
}

/// Заголовочные блоки сообщения (блоки 1 и 2), сырой текст без разбора.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeader {
    /// блок 1: Basic Header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_header: Option<String>,
    /// блок 2: Application Header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_header: Option<String>,
}

/// Участник платежа: плательщик (:50K:) или получатель (:59:).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    /// номер счёта - первая строка поля, если она начинается с '/'
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// имя участника
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// адрес, построчно, в исходном порядке
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
}

/// Данные транзакции, накопленные из полей блока 4.
///
/// Все атрибуты необязательные: парсер работает в режиме "собрать всё,
/// что получилось", а полноту проверяет сборщик сообщения отдельным
/// шагом. Повторный тег перезаписывает значение (последний выигрывает).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// :20: Transaction Reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// :23B: Bank Operation Code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_operation_code: Option<String>,

    /// дата валютирования из :32A: как ISO-8601 строка "20yy-mm-dd"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,

    /// код валюты из :32A:, 3 заглавные буквы
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// сумма из :32A: как строка с десятичной точкой, напр. "10000.00"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// :50K: Ordering Customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering_customer: Option<PartyInfo>,

    /// :59: Beneficiary Customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<PartyInfo>,

    /// :70: Remittance Information, построчно, без пустых строк
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remittance_info: Vec<String>,

    /// :71A: Details of Charges (BEN/OUR/SHA)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_bearer: Option<String>,

    /// нераспознанные теги: ключ "field_<тег>" -> сырое значение
    #[serde(flatten)]
    pub extra_fields: BTreeMap<String, String>,
}

/// Центральная/корневая структура библиотеки: результат разбора одного
/// сообщения MT103.
///
/// Результат возвращается всегда, даже для безнадёжно плохого входа:
/// всё, что удалось извлечь, лежит в [`ParsedMessage::transaction`],
/// а все найденные проблемы - в [`ParsedMessage::errors`].
///
/// Инвариант: `valid == errors.is_empty()` по завершении разбора.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMessage {
    /// заголовочные блоки, если во входе были блоки 1/2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<MessageHeader>,
    /// извлечённые данные транзакции (возможно частичные)
    pub transaction: Transaction,
    /// false, если при разборе нашлась хотя бы одна проблема
    pub valid: bool,
    /// человекочитаемые сообщения обо всех найденных проблемах
    pub errors: Vec<String>,
    /// сырой вывод токенизатора, в порядке появления полей
    pub raw_fields: Vec<RawField>,
}

impl fmt::Display for PartyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if let Some(account) = &self.account {
            parts.push(format!("/{account}"));
        }
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        parts.extend(self.address.iter().cloned());

        write!(f, "{}", parts.join(", "))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} {:<4} {:<10} {:<3} {:>14} {:<3}",
            self.reference.as_deref().unwrap_or(""),
            self.bank_operation_code.as_deref().unwrap_or(""),
            self.value_date.as_deref().unwrap_or(""),
            self.currency.as_deref().unwrap_or(""),
            self.amount.as_deref().unwrap_or(""),
            self.charge_bearer.as_deref().unwrap_or(""),
        )
    }
}
