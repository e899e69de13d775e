/// Каноническое тестовое сообщение MT103: корректный единичный перевод
/// с заголовками, обоими участниками и назначением платежа.
///
/// Удобно для примеров, тестов и флага `--sample` у CLI.
pub fn sample_message() -> &'static str {
    r#"{1:F01BANKBEBBAXXX0000000000}
{2:I103BANKDEFFXXXXN}
{4:
:20:REF20231205001
:23B:CRED
:32A:231205USD10000,00
:50K:/1234567890
JOHN DOE
123 MAIN STREET
NEW YORK NY 10001
:59:/9876543210
JANE SMITH
456 ELM AVENUE
LOS ANGELES CA 90001
:70:INVOICE INV-2023-12345
PAYMENT FOR SERVICES
:71A:SHA
-}"#
}
