use super::*;

fn check_tokens(input: &str, expected: &[(TokenType, &str)]) {
    let mut lexer = Lexer::new(input);

    for (i, (token_type, source)) in expected.iter().enumerate() {
        let token = lexer.next_token();

        assert_eq!(*token_type, token.token_type(), "token {} of {:?}", i, input);
        assert_eq!(*source, token.source(), "token {} of {:?}", i, input);
    }

    assert_eq!(TokenType::Eof, lexer.next_token().token_type());
}

mod tokens {
    use super::*;

    #[test]
    pub fn test_program_tokens() {
        let input = "let five = 5;
let ten = 10;

let add = fn(x, y) {
    x + y;
};

let result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
\"foobar\"
\"foo bar\"
[1, 2];
{\"foo\": \"bar\"}
19 % 4;
3.14;
const pi = 3;
while (i < 5) { i = i + 1; }
";

        check_tokens(input, &[
            (TokenType::Let, "let"),
            (TokenType::Identifier, "five"),
            (TokenType::Assign, "="),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Identifier, "ten"),
            (TokenType::Assign, "="),
            (TokenType::Int, "10"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Identifier, "add"),
            (TokenType::Assign, "="),
            (TokenType::Function, "fn"),
            (TokenType::ParenthesisLeft, "("),
            (TokenType::Identifier, "x"),
            (TokenType::Comma, ","),
            (TokenType::Identifier, "y"),
            (TokenType::ParenthesisRight, ")"),
            (TokenType::BracketLeft, "{"),
            (TokenType::Identifier, "x"),
            (TokenType::Plus, "+"),
            (TokenType::Identifier, "y"),
            (TokenType::Semicolon, ";"),
            (TokenType::BracketRight, "}"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Identifier, "result"),
            (TokenType::Assign, "="),
            (TokenType::Identifier, "add"),
            (TokenType::ParenthesisLeft, "("),
            (TokenType::Identifier, "five"),
            (TokenType::Comma, ","),
            (TokenType::Identifier, "ten"),
            (TokenType::ParenthesisRight, ")"),
            (TokenType::Semicolon, ";"),
            (TokenType::Not, "!"),
            (TokenType::Minus, "-"),
            (TokenType::Divide, "/"),
            (TokenType::Multiply, "*"),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Int, "5"),
            (TokenType::Less, "<"),
            (TokenType::Int, "10"),
            (TokenType::Greater, ">"),
            (TokenType::Int, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::If, "if"),
            (TokenType::ParenthesisLeft, "("),
            (TokenType::Int, "5"),
            (TokenType::Less, "<"),
            (TokenType::Int, "10"),
            (TokenType::ParenthesisRight, ")"),
            (TokenType::BracketLeft, "{"),
            (TokenType::Return, "return"),
            (TokenType::True, "true"),
            (TokenType::Semicolon, ";"),
            (TokenType::BracketRight, "}"),
            (TokenType::Else, "else"),
            (TokenType::BracketLeft, "{"),
            (TokenType::Return, "return"),
            (TokenType::False, "false"),
            (TokenType::Semicolon, ";"),
            (TokenType::BracketRight, "}"),
            (TokenType::Int, "10"),
            (TokenType::Equal, "=="),
            (TokenType::Int, "10"),
            (TokenType::Semicolon, ";"),
            (TokenType::Int, "10"),
            (TokenType::NotEqual, "!="),
            (TokenType::Int, "9"),
            (TokenType::Semicolon, ";"),
            (TokenType::String, "foobar"),
            (TokenType::String, "foo bar"),
            (TokenType::SquareBracketLeft, "["),
            (TokenType::Int, "1"),
            (TokenType::Comma, ","),
            (TokenType::Int, "2"),
            (TokenType::SquareBracketRight, "]"),
            (TokenType::Semicolon, ";"),
            (TokenType::BracketLeft, "{"),
            (TokenType::String, "foo"),
            (TokenType::Colon, ":"),
            (TokenType::String, "bar"),
            (TokenType::BracketRight, "}"),
            (TokenType::Int, "19"),
            (TokenType::Modulo, "%"),
            (TokenType::Int, "4"),
            (TokenType::Semicolon, ";"),
            (TokenType::Int, "3"),
            (TokenType::Dot, "."),
            (TokenType::Int, "14"),
            (TokenType::Semicolon, ";"),
            (TokenType::Const, "const"),
            (TokenType::Identifier, "pi"),
            (TokenType::Assign, "="),
            (TokenType::Int, "3"),
            (TokenType::Semicolon, ";"),
            (TokenType::While, "while"),
            (TokenType::ParenthesisLeft, "("),
            (TokenType::Identifier, "i"),
            (TokenType::Less, "<"),
            (TokenType::Int, "5"),
            (TokenType::ParenthesisRight, ")"),
            (TokenType::BracketLeft, "{"),
            (TokenType::Identifier, "i"),
            (TokenType::Assign, "="),
            (TokenType::Identifier, "i"),
            (TokenType::Plus, "+"),
            (TokenType::Int, "1"),
            (TokenType::Semicolon, ";"),
            (TokenType::BracketRight, "}"),
        ]);
    }

    #[test]
    pub fn test_keyword_prefixes_are_identifiers() {
        check_tokens("lets fnord whiled constant iffy truth
elsewhere returns falsey", &[
            (TokenType::Identifier, "lets"),
            (TokenType::Identifier, "fnord"),
            (TokenType::Identifier, "whiled"),
            (TokenType::Identifier, "constant"),
            (TokenType::Identifier, "iffy"),
            (TokenType::Identifier, "truth"),
            (TokenType::Identifier, "elsewhere"),
            (TokenType::Identifier, "returns"),
            (TokenType::Identifier, "falsey"),
        ]);
    }

    #[test]
    pub fn test_illegal_character() {
        check_tokens("let a = 5 @ 7;", &[
            (TokenType::Let, "let"),
            (TokenType::Identifier, "a"),
            (TokenType::Assign, "="),
            (TokenType::Int, "5"),
            (TokenType::Illegal, "@"),
            (TokenType::Int, "7"),
            (TokenType::Semicolon, ";"),
        ]);
    }

    #[test]
    pub fn test_unterminated_string_runs_to_eof() {
        check_tokens("\"abc", &[
            (TokenType::String, "abc"),
        ]);
    }

    #[test]
    pub fn test_eof_is_repeatable() {
        let mut lexer = Lexer::new("5");
        assert_eq!(TokenType::Int, lexer.next_token().token_type());
        assert_eq!(TokenType::Eof, lexer.next_token().token_type());
        assert_eq!(TokenType::Eof, lexer.next_token().token_type());
    }
}

mod positions {
    use super::*;

    #[test]
    pub fn test_token_positions() {
        let mut lexer = Lexer::new("let x = 5;\nx");

        let token = lexer.next_token();
        assert_eq!(TokenType::Let, token.token_type());
        assert_eq!(&TokenPos::new(1, 1), token.start());

        let token = lexer.next_token();
        assert_eq!(TokenType::Identifier, token.token_type());
        assert_eq!(&TokenPos::new(1, 5), token.start());

        let _ = lexer.next_token(); // =
        let _ = lexer.next_token(); // 5
        let _ = lexer.next_token(); // ;

        let token = lexer.next_token();
        assert_eq!(TokenType::Identifier, token.token_type());
        assert_eq!(&TokenPos::new(2, 1), token.start());
    }
}
