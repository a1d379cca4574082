use std::fmt;

const HEX_PREFIX: &str = "0x";

/// Идентификатор окна верхнего уровня в канонической форме.
///
/// wmctrl печатает идентификаторы как `0x03a00003`, xdotool как `60817411`.
/// Оба варианта обозначают одно и то же окно, поэтому сравнение, поиск во
/// множествах и запись в хранилище идут только через каноническую форму.
/// Получить значение можно исключительно через [`WindowId::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(String);

impl WindowId {
    /// Приводит сырой идентификатор к канонической форме `0x%08x`.
    ///
    /// Значения с префиксом `0x` возвращаются как есть, десятичные числа
    /// переводятся в шестнадцатеричный вид. Всё остальное проходит без
    /// изменений и просто ни с чем не совпадёт.
    pub fn normalize(raw: &str) -> Self {
        if raw.starts_with(HEX_PREFIX) {
            return Self(raw.to_string());
        }

        match raw.parse::<u64>() {
            Ok(value) => Self(format!("{HEX_PREFIX}{value:08x}")),
            Err(_) => Self(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
