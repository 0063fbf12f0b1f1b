use sea_orm::{
    ColumnTrait,
    sea_query::{Expr, Func, SimpleExpr},
};

/// Case-insensitive equality: `lower(column) = lower(value)`.
pub trait LowerEq {
    fn lower_eq(self, value: &str) -> SimpleExpr;
}

impl<C> LowerEq for C
where
    C: ColumnTrait,
{
    fn lower_eq(self, value: &str) -> SimpleExpr {
        Expr::expr(Func::lower(Expr::col(self.as_column_ref()))).eq(value.to_lowercase())
    }
}
