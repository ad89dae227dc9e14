// ============================================================================
// Number Format Configuration
// Locale conventions used when reading and writing numbers and fractions
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separators and symbols for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NumberFormat {
    /// Separator between integer and fractional digits (e.g. "." or ",")
    pub decimal_separator: String,

    /// Separator between digit groups (e.g. "," or a narrow no-break space)
    pub group_separator: String,

    /// Digits per group; 0 disables grouping when formatting
    pub group_size: usize,

    pub negative_sign: String,
    pub positive_sign: String,

    /// Marker dividing a value by 100
    pub percent_symbol: String,

    /// Marker dividing a value by 1000
    pub per_mille_symbol: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::invariant()
    }
}

impl NumberFormat {
    /// Culture-neutral conventions ("1,234.5", "-", "%")
    pub fn invariant() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            group_size: 3,
            negative_sign: "-".to_string(),
            positive_sign: "+".to_string(),
            percent_symbol: "%".to_string(),
            per_mille_symbol: "‰".to_string(),
        }
    }

    /// Builder method: Set the decimal separator
    pub fn with_decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    /// Builder method: Set the group separator
    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    /// Builder method: Set the group size
    pub fn with_group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    /// Builder method: Set the negative sign
    pub fn with_negative_sign(mut self, sign: impl Into<String>) -> Self {
        self.negative_sign = sign.into();
        self
    }

    /// Builder method: Set the positive sign
    pub fn with_positive_sign(mut self, sign: impl Into<String>) -> Self {
        self.positive_sign = sign.into();
        self
    }

    /// Builder method: Set the percent symbol
    pub fn with_percent_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.percent_symbol = symbol.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.decimal_separator.is_empty() {
            return Err("Decimal separator cannot be empty".to_string());
        }
        if self.negative_sign.is_empty() {
            return Err("Negative sign cannot be empty".to_string());
        }
        if self.decimal_separator == self.group_separator {
            return Err("Decimal and group separators must differ".to_string());
        }
        if self.negative_sign == self.positive_sign {
            return Err("Negative and positive signs must differ".to_string());
        }
        if self.decimal_separator.chars().any(|c| c.is_ascii_digit())
            || self.group_separator.chars().any(|c| c.is_ascii_digit())
        {
            return Err("Separators cannot contain digits".to_string());
        }
        if self.percent_symbol.is_empty() || self.per_mille_symbol.is_empty() {
            return Err("Percent symbols cannot be empty".to_string());
        }
        Ok(())
    }

    /// True when the group separator is whitespace, which makes a plain
    /// space ambiguous between "1 000" and "1 1/2".
    pub fn group_separator_is_space(&self) -> bool {
        !self.group_separator.is_empty() && self.group_separator.chars().all(char::is_whitespace)
    }

    /// Separators allowed between a whole part and its fraction: any space,
    /// plus `+` in locales that group digits with spaces.
    pub fn is_whole_separator(&self, c: char) -> bool {
        c.is_whitespace() || (c == '+' && self.group_separator_is_space())
    }

    /// Load a configuration from JSON; missing fields take invariant values.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, String> {
        let format: Self = serde_json::from_str(text).map_err(|e| e.to_string())?;
        format.validate()?;
        Ok(format)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl NumberFormat {
    /// US English: "1,234.5"
    pub fn en_us() -> Self {
        Self::invariant()
    }

    /// German: "1.234,5"
    pub fn de_de() -> Self {
        Self::invariant()
            .with_decimal_separator(",")
            .with_group_separator(".")
    }

    /// French: "1 234,5" with a narrow no-break space
    pub fn fr_fr() -> Self {
        Self::invariant()
            .with_decimal_separator(",")
            .with_group_separator("\u{202F}")
    }
}
