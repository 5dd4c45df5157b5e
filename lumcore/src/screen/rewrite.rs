use lumir::decl::{Block, Statement};

/// New body made of `statement` followed by the statements of `body`.
///
/// A declaration without body gets a body holding only `statement`.
pub fn prepend_statement(body: Option<&Block>, statement: Statement) -> Block {
    let original = body.map(|body| body.statements.as_slice()).unwrap_or(&[]);

    let mut statements = Vec::with_capacity(original.len() + 1);
    statements.push(statement);
    statements.extend_from_slice(original);
    Block::new(statements)
}

#[cfg(test)]
mod tests {
    use lumir::expr::{Expression, Literal};

    use super::*;

    fn marker(value: i64) -> Statement {
        Statement::Expr(Expression::Literal(Literal::Int(value)))
    }

    #[test]
    fn statement_goes_first_and_order_is_kept() {
        let original = Block::new(vec![marker(1), marker(2), Statement::Return(None)]);
        let rewritten = prepend_statement(Some(&original), marker(0));

        assert_eq!(rewritten.len(), original.len() + 1);
        assert_eq!(rewritten.statements[0], marker(0));
        assert_eq!(&rewritten.statements[1..], original.statements.as_slice());
    }

    #[test]
    fn missing_body_gets_a_single_statement() {
        let rewritten = prepend_statement(None, marker(0));
        assert_eq!(rewritten, Block::new(vec![marker(0)]));
    }
}
