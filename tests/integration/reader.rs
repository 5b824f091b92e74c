// Reader behavior through the public API.
use skein::read_str;
use skein::syntax::SyntaxKind;

#[test]
fn test_integer_and_float_tokens() {
    let forms = read_str("t", "1 1.0").unwrap();
    assert!(matches!(forms[0].kind, SyntaxKind::Int(1)));
    assert!(matches!(forms[1].kind, SyntaxKind::Float(x) if x == 1.0));
}

#[test]
fn test_hex_literal() {
    let forms = read_str("t", "#xFF").unwrap();
    assert!(matches!(forms[0].kind, SyntaxKind::Int(255)));
}

#[test]
fn test_nested_empty_lists() {
    let forms = read_str("t", "(()())").unwrap();
    let SyntaxKind::List(items) = &forms[0].kind else {
        panic!("expected a list, got {}", forms[0]);
    };
    assert_eq!(items.len(), 2);
    for item in items {
        assert!(matches!(&item.kind, SyntaxKind::List(inner) if inner.is_empty()));
    }
}

#[test]
fn test_print_reads_back() {
    let source = "(define (f a . rest) #(1 2.5 \"s\\n\") #\\a 'q (x . y))";
    let first = read_str("t", source).unwrap();
    let printed = first[0].to_string();
    let second = read_str("t", &printed).unwrap();
    assert!(first[0].same_datum(&second[0]), "{} vs {}", first[0], second[0]);
}

#[test]
fn test_locations_are_one_based() {
    let forms = read_str("file.scm", "\n  (a\n   b)").unwrap();
    assert_eq!(forms[0].loc.line, 2);
    assert_eq!(forms[0].loc.col, 3);
    let SyntaxKind::List(items) = &forms[0].kind else {
        panic!("expected a list");
    };
    assert_eq!((items[1].loc.line, items[1].loc.col), (3, 4));
    assert_eq!(&*items[1].loc.file, "file.scm");
}

#[test]
fn test_comments_are_skipped() {
    let forms = read_str("t", "; line\n#| block |# 42 #| #| nested |# |# 43").unwrap();
    assert_eq!(forms.len(), 2);
    assert!(matches!(forms[1].kind, SyntaxKind::Int(43)));
}

#[test]
fn test_runaway_nesting_is_an_error() {
    let src = format!("{}1{}", "(list ".repeat(50_000), ")".repeat(50_000));
    let err = read_str("deep", &src).unwrap_err();
    assert!(err.to_string().starts_with("deep(1,"), "{}", err);
    assert!(err.to_string().contains("nesting deeper than"), "{}", err);
}
