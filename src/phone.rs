//! Phone-number input widget attached to the `number` element.
//!
//! The widget keeps whatever the visitor typed and hands out a normalized,
//! E.164-style number on demand.

/// Which kind of example number the widget shows as its placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderNumberType {
    #[default]
    Mobile,
    FixedLine,
}

impl PlaceholderNumberType {
    pub fn example(self) -> &'static str {
        match self {
            PlaceholderNumberType::Mobile => "(201) 555-0123",
            PlaceholderNumberType::FixedLine => "(201) 555-0100",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhoneInputOptions {
    pub placeholder_number_type: PlaceholderNumberType,
}

#[derive(Debug, Clone)]
pub struct PhoneInput {
    element_id: &'static str,
    options: PhoneInputOptions,
    raw: String,
}

impl PhoneInput {
    pub fn attach(element_id: &'static str, options: PhoneInputOptions) -> Self {
        Self {
            element_id,
            options,
            raw: String::new(),
        }
    }

    pub fn element_id(&self) -> &'static str {
        self.element_id
    }

    pub fn placeholder(&self) -> &'static str {
        self.options.placeholder_number_type.example()
    }

    /// What the visitor typed, untouched.
    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.raw = value.into();
    }

    pub fn get_number(&self) -> String {
        normalize(&self.raw)
    }

    pub fn is_valid_number(&self) -> bool {
        is_normalized(&self.get_number())
    }
}

/// Strips formatting and applies the default country code.
///
/// Ten digits are taken as a North American number and get `+1`; eleven to
/// thirteen digits already carry a country code. Anything else is returned as
/// typed.
pub fn normalize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| *c == '+' || c.is_ascii_digit())
        .collect();

    if cleaned.starts_with('+') {
        return cleaned;
    }

    match cleaned.len() {
        10 => format!("+1{cleaned}"),
        11..=13 => format!("+{cleaned}"),
        _ => input.to_string(),
    }
}

pub fn is_normalized(number: &str) -> bool {
    match number.strip_prefix('+') {
        Some(digits) => {
            (11..=13).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
