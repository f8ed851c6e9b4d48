use super::*;
use collapse_vars_ast::VarBinding;

fn binary(op: &str, left: Node, right: Node) -> Node {
    Node::Binary {
        op: op.into(),
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn name(n: &str) -> Node {
    Node::Name(n.into())
}

fn ret(n: Node) -> Node {
    Node::Return(Some(Box::new(n)))
}

fn var(name: &str, init: Node) -> Node {
    Node::Var(vec![VarBinding {
        name: name.into(),
        init: Some(init),
    }])
}

#[test]
fn optimizes_a_single_top_level_function() {
    let mut document = Node::Block(vec![Node::Defun {
        name: Some("run".into()),
        params: vec![],
        body: vec![
            var("a", binary("+", name("x"), Node::Num(1.0))),
            ret(name("a")),
        ],
    }]);

    optimize_document(&mut document, false);

    let Node::Block(stmts) = &document else {
        panic!("document root changed shape");
    };
    let Node::Defun { body, .. } = &stmts[0] else {
        panic!("expected the defun to survive");
    };
    assert_eq!(
        body,
        &vec![Node::Block(vec![]), ret(binary("+", name("x"), Node::Num(1.0)))]
    );
}

// A closure inside an otherwise-eligible outer function means the outer
// body is skipped, but the closure's own body is still a `function` node
// in its own right and gets optimized independently.
#[test]
fn nested_function_is_optimized_even_when_its_container_is_skipped() {
    let inner_body = vec![var("unused", Node::Num(1.0)), ret(Node::Num(2.0))];
    let mut document = Node::Defun {
        name: Some("outer".into()),
        params: vec![],
        body: vec![
            var(
                "callback",
                Node::Function {
                    name: None,
                    params: vec![],
                    body: inner_body,
                },
            ),
            ret(name("callback")),
        ],
    };

    optimize_document(&mut document, false);

    let Node::Defun { body: outer_body, .. } = &document else {
        panic!("expected a defun");
    };
    // the outer body's own declaration survives untouched: the guard
    // skipped it entirely.
    let Node::Var(bindings) = &outer_body[0] else {
        panic!("expected the outer var statement to survive");
    };
    let Some(Node::Function { body: inner_body, .. }) = &bindings[0].init else {
        panic!("expected the nested function to survive");
    };
    assert_eq!(inner_body, &vec![Node::Block(vec![]), ret(Node::Num(2.0))]);
}

#[test]
fn serializes_a_bare_debugger_statement() {
    let rendered = serde_json::to_string(&Node::Debugger).unwrap();
    insta::assert_snapshot!(rendered, @r#""Debugger""#);
}
