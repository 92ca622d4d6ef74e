/// Parse a numeric input field, accepting either a plain number or a simple
/// math expression containing +, -, *, / and parentheses. Returns None for
/// anything that doesn't evaluate to a number.
///
/// Examples:
/// - "12.50" -> Some(12.5)
/// - "3*4.50" -> Some(13.5)
/// - "(100-20)*2" -> Some(160.0)
/// - "12,50" -> None
pub fn parse_amount(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Fast path: plain number
    if let Ok(num) = input.parse::<f64>() {
        return Some(num);
    }

    // Check if the input contains any operators
    if !input
        .chars()
        .any(|c| matches!(c, '+' | '*' | '/' | '(' | ')') || (c == '-' && input.len() > 1))
    {
        return None;
    }

    let mut parser = ExprParser::new(input);
    parser.parse_expression()
}

/// Simple recursive descent parser for math expressions
struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse a complete expression (handles + and - at lowest precedence)
    fn parse_expression(&mut self) -> Option<f64> {
        let result = self.parse_expression_inner()?;

        self.skip_whitespace();
        // Ensure we consumed the entire input
        if self.pos == self.input.len() {
            Some(result)
        } else {
            None
        }
    }

    /// Parse an expression without checking for end of input (used for
    /// parenthesized sub-expressions)
    fn parse_expression_inner(&mut self) -> Option<f64> {
        self.skip_whitespace();
        let mut left = self.parse_term()?;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.advance();
                    let right = self.parse_term()?;
                    left += right;
                }
                Some('-') => {
                    self.advance();
                    let right = self.parse_term()?;
                    left -= right;
                }
                _ => break,
            }
        }

        Some(left)
    }

    /// Parse a term (handles * and / at higher precedence)
    fn parse_term(&mut self) -> Option<f64> {
        self.skip_whitespace();
        let mut left = self.parse_factor()?;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.advance();
                    let right = self.parse_factor()?;
                    left *= right;
                }
                Some('/') => {
                    self.advance();
                    let right = self.parse_factor()?;
                    if right == 0.0 {
                        return None; // Division by zero
                    }
                    left /= right;
                }
                _ => break,
            }
        }

        Some(left)
    }

    /// Parse a factor (number, unary +/-, or parenthesized expression)
    fn parse_factor(&mut self) -> Option<f64> {
        self.skip_whitespace();

        match self.peek() {
            Some('(') => {
                self.advance();
                let inner = self.parse_expression_inner()?;
                self.skip_whitespace();
                if self.peek() == Some(')') {
                    self.advance();
                    Some(inner)
                } else {
                    None // Missing closing paren
                }
            }
            Some('-') => {
                self.advance();
                let factor = self.parse_factor()?;
                Some(-factor)
            }
            Some('+') => {
                self.advance();
                self.parse_factor() // unary + is a no-op
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            _ => None,
        }
    }

    /// Parse a number (integer or decimal)
    fn parse_number(&mut self) -> Option<f64> {
        let start = self.pos;

        // Consume digits and at most one decimal point
        let mut has_decimal = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !has_decimal {
                has_decimal = true;
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return None;
        }

        self.input[start..self.pos].parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_plain_numbers() {
        assert_eq!(parse_amount("50"), Some(50.0));
        assert_eq!(parse_amount("-50"), Some(-50.0));
        assert_eq!(parse_amount("50.5"), Some(50.5));
        assert_eq!(parse_amount(" 1.25 "), Some(1.25));
    }

    #[test]
    fn parse_amount_addition_subtraction() {
        assert_eq!(parse_amount("10+5"), Some(15.0));
        assert_eq!(parse_amount("100-20"), Some(80.0));
        assert_eq!(parse_amount("10 + 5 - 3"), Some(12.0));
    }

    #[test]
    fn parse_amount_multiplication_division() {
        assert_eq!(parse_amount("3*4.50"), Some(13.5));
        assert_eq!(parse_amount("100/4"), Some(25.0));
        assert_eq!(parse_amount("10*5/2"), Some(25.0));
    }

    #[test]
    fn parse_amount_operator_precedence() {
        assert_eq!(parse_amount("10+5*2"), Some(20.0));
        assert_eq!(parse_amount("100-20*2"), Some(60.0));
    }

    #[test]
    fn parse_amount_parentheses() {
        assert_eq!(parse_amount("(10+5)*2"), Some(30.0));
        assert_eq!(parse_amount("(100-20)*2"), Some(160.0));
        assert_eq!(parse_amount("2*(3+4)"), Some(14.0));
    }

    #[test]
    fn parse_amount_negative_and_unary() {
        assert_eq!(parse_amount("-50+10"), Some(-40.0));
        assert_eq!(parse_amount("10+-5"), Some(5.0));
        assert_eq!(parse_amount("+20"), Some(20.0));
        assert_eq!(parse_amount("(-10)*5"), Some(-50.0));
    }

    #[test]
    fn parse_amount_invalid() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("10+"), None);
        assert_eq!(parse_amount("(10+5"), None); // missing closing paren
        assert_eq!(parse_amount("10/0"), None); // division by zero
        assert_eq!(parse_amount("12,50"), None);
    }
}
