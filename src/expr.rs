/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Canonical surface symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }

    /// Binding strength; higher binds tighter.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 2,
            BinaryOp::Pow => 4,
        }
    }

    pub(crate) fn is_right_associative(self) -> bool {
        matches!(self, BinaryOp::Pow)
    }
}

/// Unary functions reachable from function phrases. Trigonometry takes degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Ln,
    Log10,
    SinDeg,
    CosDeg,
    TanDeg,
}

impl Function {
    /// Name used in canonical call syntax.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Ln => "ln",
            Function::Log10 => "log10",
            Function::SinDeg => "sin",
            Function::CosDeg => "cos",
            Function::TanDeg => "tan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Function::Sqrt),
            "ln" => Some(Function::Ln),
            "log10" => Some(Function::Log10),
            "sin" => Some(Function::SinDeg),
            "cos" => Some(Function::CosDeg),
            "tan" => Some(Function::TanDeg),
            _ => None,
        }
    }
}

/// Expression tree. Children are owned, so the tree has no cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Call { function: Function, argument: Box<Expr> },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn call(function: Function, argument: Expr) -> Self {
        Expr::Call { function, argument: Box::new(argument) }
    }

    pub fn negate(inner: Expr) -> Self {
        Expr::Negate(Box::new(inner))
    }
}
