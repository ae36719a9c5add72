use insta::assert_snapshot;
use lexkit::celes::{tokenize, CelesKind};

fn render(tokens: &[lexkit::celes::CelesToken]) -> String {
    tokens
        .iter()
        .map(|t| match t.kind {
            CelesKind::Block(open) => {
                let inner = render(t.children.as_ref().expect("block has children"));
                format!("Block({open}){{{inner}}}")
            }
            CelesKind::Ident => format!("Ident({})", t.text),
            CelesKind::Number => format!("Number({})", t.text),
            CelesKind::String => format!("String({})", t.text),
            CelesKind::Other => format!("Other({})", t.text),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn snapshot_mixed_source_token_tree() {
    let tokens = tokenize("foo(1, bar(\"x\")) // trailing\nbaz");
    assert_snapshot!(
        render(&tokens),
        @"Ident(foo) Block((){Number(1) Other(,) Ident(bar) Block((){String(\"x\")}} Ident(baz)"
    );
}

#[test]
fn snapshot_nested_brackets() {
    let tokens = tokenize("[ { a 1 } ]");
    assert_snapshot!(render(&tokens), @"Block([){Block({){Ident(a) Number(1)}}");
}
