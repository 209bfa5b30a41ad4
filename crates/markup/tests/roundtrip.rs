use markup::{Node, deparse, parse};
use markup_test_support::random_tree::{TreeShape, random_tree};
use markup_test_support::{compare_trees, env_u64};

fn check_roundtrip(tree: &Node, label: &str) {
    let text = deparse(tree);
    let reparsed = match parse(&text) {
        Ok(node) => node,
        Err(err) => panic!("{label}: reparse failed with {err}\ninput: {text}"),
    };
    if let Err(mismatch) = compare_trees(tree, &reparsed) {
        panic!("{label}: round trip changed the tree\ninput: {text}\n{mismatch}");
    }
    assert_eq!(deparse(&reparsed), text, "{label}: second deparse differs");
}

#[test]
fn roundtrip_handwritten_trees() {
    let trees = [
        Node::new("leaf"),
        Node::new("n").with_attrs([("k", "1"), ("k", "2")]),
        Node::new("n").with_data("text with > and 'quotes' and \"dq\""),
        Node::new("root")
            .with_data("\n  ")
            .with_attrs([("v", "a > b = c / d")])
            .with_children([
                Node::new("a").with_children([Node::new("b").with_data("deep")]),
                Node::new("c").with_attrs([("empty", "")]),
            ]),
    ];
    for (i, tree) in trees.iter().enumerate() {
        check_roundtrip(tree, &format!("handwritten[{i}]"));
    }
}

#[test]
fn roundtrip_random_trees() {
    let runs = env_u64("MARKUP_ROUNDTRIP_RUNS", 256);
    let base_seed = env_u64("MARKUP_ROUNDTRIP_SEED", 0xC0FFEE);
    let shape = TreeShape::default();
    for run in 0..runs {
        let seed = base_seed.wrapping_add(run);
        let tree = random_tree(seed, shape);
        check_roundtrip(&tree, &format!("seed=0x{seed:x}"));
    }
}

#[test]
fn roundtrip_wide_and_deep_shapes() {
    let wide = TreeShape {
        max_depth: 1,
        max_children: 64,
        ..TreeShape::default()
    };
    let deep = TreeShape {
        max_depth: 40,
        max_children: 1,
        ..TreeShape::default()
    };
    for seed in 1..16u64 {
        check_roundtrip(&random_tree(seed, wide), &format!("wide seed={seed}"));
        check_roundtrip(&random_tree(seed, deep), &format!("deep seed={seed}"));
    }
}
