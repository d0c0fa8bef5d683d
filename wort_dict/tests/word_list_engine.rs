use wort_core::translator::NoTranslation;
use wort_core::{Engine, Node, Word};
use wort_dict::WordList;

fn dict() -> WordList {
    WordList::from_strs(
        "Schuld\nSchuldig\nEntschuldigung\nTag\nBuch\n",
        "ent\n",
        "ig\nung\nes\n",
    )
}

#[test]
fn splits_with_prefixes_and_suffixes() {
    let engine = Engine::new(dict(), NoTranslation);
    let tree = engine.split("Entschuldigung").unwrap().unwrap();

    assert_eq!(tree.word(), &Word::Known("entschuldigung".into()));
    assert_eq!(tree.prefix(), Some(&Node::leaf("ent")));
    assert_eq!(tree.leaves(), vec!["ent", "schuld", "ig", "ung"]);

    let rest = tree.suffix().unwrap();
    assert_eq!(rest.word(), &Word::Junction);
    assert_eq!(
        rest.prefix().map(Node::word),
        Some(&Word::Known("schuldig".into()))
    );
}

#[test]
fn connective_suffix_is_an_ordinary_leaf() {
    let engine = Engine::new(dict(), NoTranslation);
    let tree = engine.split("Tagesbuch").unwrap().unwrap();

    assert_eq!(tree.word(), &Word::Junction);
    assert_eq!(tree.leaves(), vec!["tag", "es", "buch"]);
}
