//! pt-PT display formatting for money and dates

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Format a money amount the way the pt-PT locale prints euros,
/// e.g. `1 234,56 €` with non-breaking spaces.
pub fn euro(valor: Decimal) -> String {
    let mut arredondado = valor.round_dp(2);
    arredondado.rescale(2);

    let texto = arredondado.abs().to_string();
    let (inteiro, decimais) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    let digitos: Vec<char> = inteiro.chars().collect();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('\u{a0}');
        }
        agrupado.push(*c);
    }

    let sinal = if arredondado.is_sign_negative() && !arredondado.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{},{}\u{a0}€", sinal, agrupado, decimais)
}

/// Format a date as DD/MM/YYYY
pub fn data_curta(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

/// Format an ISO-8601 timestamp or plain date as DD/MM/YYYY, passing
/// unparseable input through untouched
pub fn data_de_iso(iso: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(iso) {
        return data_curta(dt.date_naive());
    }
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(d) => data_curta(d),
        Err(_) => iso.to_string(),
    }
}
