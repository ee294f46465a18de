//! Character classes used by the grammar.
pub trait CharExt {
    fn is_identifier_start(&self) -> bool;

    fn is_identifier_continue(&self) -> bool;

    fn is_number_literal(&self) -> bool;

    fn is_char_literal_content(&self) -> bool;
}
impl CharExt for char {
    fn is_identifier_start(&self) -> bool {
        self.is_alphabetic()
    }

    fn is_identifier_continue(&self) -> bool {
        self.is_alphanumeric() || *self == '_'
    }

    fn is_number_literal(&self) -> bool {
        self.is_ascii_digit() || *self == '.'
    }

    fn is_char_literal_content(&self) -> bool {
        self.is_alphanumeric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_may_continue_with_digits_and_underscores() {
        assert!('a'.is_identifier_start());
        assert!(!'1'.is_identifier_start());
        assert!(!'_'.is_identifier_start());
        assert!('1'.is_identifier_continue());
        assert!('_'.is_identifier_continue());
        assert!(!'+'.is_identifier_continue());
    }

    #[test]
    fn number_literals_include_the_decimal_point() {
        assert!('7'.is_number_literal());
        assert!('.'.is_number_literal());
        assert!(!'e'.is_number_literal());
    }
}
