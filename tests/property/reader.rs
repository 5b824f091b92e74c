// Property tests for the reader.
//
// Printing a parsed tree and reading it back yields the same tree, and no
// input makes the lexer or parser panic.

use proptest::prelude::*;
use skein::reader::Lexer;
use skein::read_str;

fn atom() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        (-1.0e6f64..1.0e6).prop_map(|x| format!("{:?}", x)),
        prop::sample::select(vec!["a", "foo", "x1", "+", "list->vector", "set!", "<=", ":key"])
            .prop_map(String::from),
        "[a-z \\n\"\\\\]{0,8}".prop_map(|s| {
            let escaped: String = s
                .chars()
                .map(|c| match c {
                    '"' => "\\\"".to_string(),
                    '\\' => "\\\\".to_string(),
                    '\n' => "\\n".to_string(),
                    c => c.to_string(),
                })
                .collect();
            format!("\"{}\"", escaped)
        }),
        prop::sample::select(vec!["#t", "#f", "#\\a", "#\\space", "#\\newline"]).prop_map(String::from),
    ]
}

fn datum() -> impl Strategy<Value = String> {
    atom().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|xs| format!("({})", xs.join(" "))),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|xs| format!("#({})", xs.join(" "))),
            (prop::collection::vec(inner.clone(), 1..4), inner.clone())
                .prop_map(|(xs, tail)| format!("({} . {})", xs.join(" "), tail)),
            inner.prop_map(|x| format!("'{}", x)),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn print_then_read_is_identity(src in datum()) {
        let first = read_str("p", &src).unwrap();
        prop_assert_eq!(first.len(), 1);
        let printed = first[0].to_string();
        let second = read_str("p", &printed).unwrap();
        prop_assert_eq!(second.len(), 1);
        prop_assert!(first[0].same_datum(&second[0]), "{} vs {}", src, printed);
    }

    #[test]
    fn lexer_never_panics(src in "\\PC{0,64}") {
        let count = Lexer::new("p", &src).take(src.len() + 1).count();
        prop_assert!(count <= src.len());
        let _ = read_str("p", &src);
    }

    #[test]
    fn integers_read_exactly(n in any::<i64>()) {
        let forms = read_str("p", &n.to_string()).unwrap();
        prop_assert_eq!(forms[0].to_string(), n.to_string());
    }
}
