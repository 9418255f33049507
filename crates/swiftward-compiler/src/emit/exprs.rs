//! Swift rendering of expressions and statements.

use swiftward_ast::{
    BinaryOp, ExprId, ExprKind, Literal, Pattern, PostfixOp, SizeOfTarget, StmtId, StmtKind,
    SwiftAst,
};
use swiftward_core::{Ownership, SwiftType};

/// Renders expressions and statement bodies against one unit's arena.
pub struct ExprPrinter<'a> {
    pub ast: &'a SwiftAst,
}

/// Binding power of an expression for parenthesization decisions; higher
/// binds tighter.
fn precedence(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Assignment { .. } => 0,
        ExprKind::Ternary { .. } => 1,
        ExprKind::Binary { op, .. } => 2 + binary_precedence(*op),
        ExprKind::Cast { .. } | ExprKind::TypeCheck { .. } => 13,
        ExprKind::Unary { .. } => 14,
        _ => 15,
    }
}

fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::LogicalOr => 0,
        BinaryOp::LogicalAnd => 1,
        BinaryOp::NilCoalesce => 2,
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::Less
        | BinaryOp::LessEqual
        | BinaryOp::Greater
        | BinaryOp::GreaterEqual => 3,
        BinaryOp::BitwiseOr => 4,
        BinaryOp::BitwiseXor => 5,
        BinaryOp::BitwiseAnd => 6,
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => 7,
        BinaryOp::Add | BinaryOp::Subtract => 8,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 9,
    }
}

impl ExprPrinter<'_> {
    pub fn new(ast: &SwiftAst) -> ExprPrinter<'_> {
        ExprPrinter { ast }
    }

    pub fn render(&self, id: ExprId) -> String {
        self.render_at(id, 0)
    }

    /// Renders with the given indentation context for nested closures.
    fn render_at(&self, id: ExprId, indent: usize) -> String {
        match self.ast.expr_kind(id) {
            ExprKind::Identifier(name) => name.clone(),
            ExprKind::Constant(literal) => render_literal(literal),
            ExprKind::ArrayLiteral(items) => {
                let parts: Vec<String> =
                    items.iter().map(|e| self.render_at(*e, indent)).collect();
                format!("[{}]", parts.join(", "))
            }
            ExprKind::DictionaryLiteral(pairs) => {
                if pairs.is_empty() {
                    return "[:]".to_string();
                }
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            self.render_at(*k, indent),
                            self.render_at(*v, indent)
                        )
                    })
                    .collect();
                format!("[{}]", parts.join(", "))
            }
            ExprKind::Unary { op, operand } => {
                format!("{}{}", op.symbol(), self.child(*operand, 14, indent))
            }
            ExprKind::Binary { lhs, op, rhs } => {
                let prec = 2 + binary_precedence(*op);
                format!(
                    "{} {} {}",
                    self.child(*lhs, prec, indent),
                    op.symbol(),
                    self.child(*rhs, prec + 1, indent)
                )
            }
            ExprKind::Ternary {
                condition,
                if_true,
                if_false,
            } => format!(
                "{} ? {} : {}",
                self.child(*condition, 2, indent),
                self.render_at(*if_true, indent),
                self.render_at(*if_false, indent)
            ),
            ExprKind::Assignment { lhs, op, rhs } => format!(
                "{} {} {}",
                self.render_at(*lhs, indent),
                op.symbol(),
                self.render_at(*rhs, indent)
            ),
            ExprKind::Cast { expr, to, optional } => {
                let keyword = if *optional { "as?" } else { "as!" };
                format!("{} {} {}", self.child(*expr, 13, indent), keyword, to)
            }
            ExprKind::TypeCheck { expr, ty } => {
                format!("{} is {}", self.child(*expr, 13, indent), ty)
            }
            ExprKind::Parens(inner) => format!("({})", self.render_at(*inner, indent)),
            ExprKind::Postfix { base, op } => self.render_postfix(*base, op, indent),
            ExprKind::Closure {
                parameters,
                return_type,
                body,
            } => self.render_closure(parameters, return_type, *body, indent),
            ExprKind::SizeOf(SizeOfTarget::Type(ty)) => {
                format!("MemoryLayout<{ty}>.size")
            }
            ExprKind::SizeOf(SizeOfTarget::Expression(expr)) => {
                format!(
                    "MemoryLayout.size(ofValue: {})",
                    self.render_at(*expr, indent)
                )
            }
            ExprKind::Unknown(context) => context.clone(),
        }
    }

    /// Child rendering, parenthesized when it binds looser than the parent.
    fn child(&self, id: ExprId, parent_precedence: u8, indent: usize) -> String {
        let rendered = self.render_at(id, indent);
        if precedence(self.ast.expr_kind(id)) < parent_precedence {
            format!("({rendered})")
        } else {
            rendered
        }
    }

    fn render_postfix(&self, base: ExprId, op: &PostfixOp, indent: usize) -> String {
        let base_text = self.child(base, 15, indent);
        match op {
            PostfixOp::Member {
                name,
                optional_access,
            } => {
                let access = if *optional_access { "?." } else { "." };
                format!("{base_text}{access}{name}")
            }
            PostfixOp::Call { arguments } => {
                let parts: Vec<String> = arguments
                    .iter()
                    .map(|argument| {
                        let value = self.render_at(argument.value, indent);
                        match &argument.label {
                            Some(label) => format!("{label}: {value}"),
                            None => value,
                        }
                    })
                    .collect();
                format!("{base_text}({})", parts.join(", "))
            }
            PostfixOp::Subscript {
                index,
                optional_access,
            } => {
                let access = if *optional_access { "?" } else { "" };
                format!("{base_text}{access}[{}]", self.render_at(*index, indent))
            }
        }
    }

    fn render_closure(
        &self,
        parameters: &[swiftward_ast::BlockParameter],
        return_type: &SwiftType,
        body: StmtId,
        indent: usize,
    ) -> String {
        let mut header = String::from("{");
        if !parameters.is_empty() || !return_type.is_void() {
            let params: Vec<String> = parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty))
                .collect();
            header.push_str(&format!(" ({}) -> {return_type} in", params.join(", ")));
        }
        let mut out = header;
        out.push('\n');
        out.push_str(&self.render_body_lines(body, indent + 1));
        out.push_str(&"    ".repeat(indent));
        out.push('}');
        out
    }

    /// Renders the statements of a compound body, one indented line each.
    fn render_body_lines(&self, body: StmtId, indent: usize) -> String {
        let mut out = String::new();
        let StmtKind::Compound(children) = self.ast.stmt_kind(body) else {
            out.push_str(&"    ".repeat(indent));
            out.push_str(&self.render_stmt(body, indent));
            out.push('\n');
            return out;
        };
        for child in children {
            for line in self.render_stmt(*child, indent).split('\n') {
                if line.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(&"    ".repeat(indent));
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Renders one statement; multi-line output is unindented relative to
    /// its own first line (the caller indents).
    pub fn render_stmt(&self, id: StmtId, indent: usize) -> String {
        let data = self.ast.stmt(id);
        let mut prefix = String::new();
        for comment in &data.comments {
            prefix.push_str("// ");
            prefix.push_str(comment);
            prefix.push('\n');
        }
        let label_prefix = match &data.label {
            Some(label) => format!("{label}: "),
            None => String::new(),
        };
        let body = match self.ast.stmt_kind(id) {
            StmtKind::Compound(_) => {
                let mut out = String::from("{\n");
                out.push_str(&self.render_body_lines(id, 1));
                out.push('}');
                out
            }
            StmtKind::If {
                condition,
                binding,
                body,
                else_body,
            } => {
                let head = match binding {
                    Some(pattern) => format!(
                        "if let {} = {}",
                        render_pattern(self, pattern),
                        self.render_at(*condition, indent)
                    ),
                    None => format!("if {}", self.render_at(*condition, indent)),
                };
                let mut out = format!("{head} {}", self.render_block(*body, indent));
                if let Some(else_body) = else_body {
                    if matches!(self.ast.stmt_kind(*else_body), StmtKind::If { .. }) {
                        out.push_str(&format!(
                            " else {}",
                            self.render_stmt(*else_body, indent)
                        ));
                    } else {
                        out.push_str(&format!(
                            " else {}",
                            self.render_block(*else_body, indent)
                        ));
                    }
                }
                out
            }
            StmtKind::While { condition, body } => {
                format!(
                    "while {} {}",
                    self.render_at(*condition, indent),
                    self.render_block(*body, indent)
                )
            }
            StmtKind::RepeatWhile { condition, body } => {
                format!(
                    "repeat {} while {}",
                    self.render_block(*body, indent),
                    self.render_at(*condition, indent)
                )
            }
            StmtKind::For {
                pattern,
                iterated,
                body,
            } => format!(
                "for {} in {} {}",
                render_pattern(self, pattern),
                self.render_at(*iterated, indent),
                self.render_block(*body, indent)
            ),
            StmtKind::Switch {
                scrutinee,
                cases,
                default,
            } => {
                let mut out = format!("switch {} {{\n", self.render_at(*scrutinee, indent));
                for case in cases {
                    let patterns: Vec<String> = case
                        .patterns
                        .iter()
                        .map(|p| render_pattern(self, p))
                        .collect();
                    out.push_str(&format!("case {}:\n", patterns.join(", ")));
                    for child in &case.body {
                        for line in self.render_stmt(*child, indent).split('\n') {
                            out.push_str("    ");
                            out.push_str(line);
                            out.push('\n');
                        }
                    }
                }
                match default {
                    Some(default) => {
                        out.push_str("default:\n");
                        if default.is_empty() {
                            out.push_str("    break\n");
                        }
                        for child in default {
                            for line in self.render_stmt(*child, indent).split('\n') {
                                out.push_str("    ");
                                out.push_str(line);
                                out.push('\n');
                            }
                        }
                    }
                    None => out.push_str("default:\n    break\n"),
                }
                out.push('}');
                out
            }
            StmtKind::Do { body } => format!("do {}", self.render_block(*body, indent)),
            StmtKind::Defer { body } => format!("defer {}", self.render_block(*body, indent)),
            StmtKind::Return(value) => match value {
                Some(value) => format!("return {}", self.render_at(*value, indent)),
                None => "return".to_string(),
            },
            StmtKind::Break(target) => match target {
                Some(target) => format!("break {target}"),
                None => "break".to_string(),
            },
            StmtKind::Continue(target) => match target {
                Some(target) => format!("continue {target}"),
                None => "continue".to_string(),
            },
            StmtKind::Expressions(exprs) => exprs
                .iter()
                .map(|e| self.render_at(*e, indent))
                .collect::<Vec<_>>()
                .join("\n"),
            StmtKind::VariableDeclarations(decls) => decls
                .iter()
                .map(|decl| {
                    let keyword = if decl.is_constant { "let" } else { "var" };
                    let ownership = match decl.ownership {
                        Ownership::Strong => String::new(),
                        other => format!("{} ", other.keyword()),
                    };
                    let annotation = if decl.ty.is_error() {
                        String::new()
                    } else {
                        format!(": {}", decl.ty)
                    };
                    match decl.initialization {
                        Some(init) => format!(
                            "{ownership}{keyword} {}{annotation} = {}",
                            decl.name,
                            self.render_at(init, indent)
                        ),
                        None => format!("{ownership}{keyword} {}{annotation}", decl.name),
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            StmtKind::Unknown(context) => context.clone(),
        };
        format!("{prefix}{label_prefix}{body}")
    }

    /// Renders a statement as a braced block.
    pub fn render_block(&self, id: StmtId, _indent: usize) -> String {
        match self.ast.stmt_kind(id) {
            StmtKind::Compound(_) => {
                let mut out = String::from("{\n");
                out.push_str(&self.render_body_lines(id, 1));
                out.push('}');
                out
            }
            _ => {
                let mut out = String::from("{\n");
                for line in self.render_stmt(id, 1).split('\n') {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('}');
                out
            }
        }
    }
}

fn render_pattern(printer: &ExprPrinter<'_>, pattern: &Pattern) -> String {
    match pattern {
        Pattern::Identifier(name) => name.clone(),
        Pattern::Wildcard => "_".to_string(),
        Pattern::Tuple(elements) => {
            let parts: Vec<String> = elements
                .iter()
                .map(|p| render_pattern(printer, p))
                .collect();
            format!("({})", parts.join(", "))
        }
        Pattern::Expression(id) => printer.render(*id),
    }
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Integer(value) => value.to_string(),
        Literal::Float(value) => {
            if value.fract() == 0.0 && value.is_finite() {
                format!("{value:.1}")
            } else {
                value.to_string()
            }
        }
        Literal::String(value) => format!("\"{value}\""),
        Literal::Boolean(true) => "true".to_string(),
        Literal::Boolean(false) => "false".to_string(),
        Literal::Nil => "nil".to_string(),
    }
}
