//! Renders nodes back into source text the parser accepts again.

use std::fmt::{self, Display, Formatter};

use super::{
    ast::{Expr, Program, Stmt},
    expressions::{Identifier, LValue},
};

const INDENT: &str = "    ";

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in self.iter() {
            write_stmt(f, stmt, 0)?;
        }
        Ok(())
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

fn write_block(f: &mut Formatter<'_>, body: &[Stmt], depth: usize) -> fmt::Result {
    writeln!(f, "{{")?;
    for stmt in body {
        write_stmt(f, stmt, depth + 1)?;
    }
    write!(f, "{}}}", INDENT.repeat(depth))
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);

    match stmt {
        Stmt::VarDecl(decl) => match &decl.init {
            Some(init) => writeln!(f, "{}{} {} = {};", pad, decl.ty, decl.id, init),
            None => writeln!(f, "{}{} {};", pad, decl.ty, decl.id),
        },
        Stmt::FnDecl(decl) => {
            let formals: Vec<String> = decl
                .formals
                .iter()
                .map(|formal| format!("{} {}", formal.ty, formal.id))
                .collect();
            write!(
                f,
                "{}fn {}({}) -> {} ",
                pad,
                decl.id,
                formals.join(", "),
                decl.ret
            )?;
            write_block(f, &decl.body, depth)?;
            writeln!(f)
        }
        Stmt::Assign(assign) => writeln!(f, "{}{};", pad, Expr::Assign(assign.exp.clone())),
        Stmt::FromConsole(read) => writeln!(f, "{}FROMCONSOLE {};", pad, read.dst),
        Stmt::ToConsole(write) => writeln!(f, "{}TOCONSOLE {};", pad, write.src),
        Stmt::PostInc(inc) => writeln!(f, "{}{}++;", pad, inc.dst),
        Stmt::PostDec(dec) => writeln!(f, "{}{}--;", pad, dec.dst),
        Stmt::If(if_stmt) => {
            write!(f, "{}if {} ", pad, if_stmt.cond)?;
            write_block(f, &if_stmt.body, depth)?;
            writeln!(f)
        }
        Stmt::IfElse(if_else) => {
            write!(f, "{}if {} ", pad, if_else.cond)?;
            write_block(f, &if_else.then_body, depth)?;
            write!(f, " else ")?;
            write_block(f, &if_else.else_body, depth)?;
            writeln!(f)
        }
        Stmt::While(while_stmt) => {
            write!(f, "{}while {} ", pad, while_stmt.cond)?;
            write_block(f, &while_stmt.body, depth)?;
            writeln!(f)
        }
        Stmt::Return(ret) => match &ret.value {
            Some(value) => writeln!(f, "{}return {};", pad, value),
            None => writeln!(f, "{}return;", pad),
        },
        Stmt::Call(call) => writeln!(f, "{}{};", pad, Expr::Call(call.call.clone())),
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for LValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LValue::Id(id) => write!(f, "{}", id),
            LValue::Ref(reference) => write!(f, "&{}", reference.id),
            LValue::Deref(deref) => write!(f, "^{}", deref.id),
            LValue::Index(index) => write!(f, "{}[{}]", index.id, index.offset),
        }
    }
}

fn escape(ch: char, quote: char) -> String {
    match ch {
        '\n' => String::from("\\n"),
        '\t' => String::from("\\t"),
        '\r' => String::from("\\r"),
        '\0' => String::from("\\0"),
        '\\' => String::from("\\\\"),
        _ if ch == quote => format!("\\{}", quote),
        _ => ch.to_string(),
    }
}

/// Operand text, parenthesised when it would not survive reparsing bare.
fn operand(expr: &Expr, wrap_unary: bool) -> String {
    match expr {
        Expr::Binary(_) | Expr::Assign(_) => format!("({})", expr),
        Expr::Unary(_) if wrap_unary => format!("({})", expr),
        _ => expr.to_string(),
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::IntLit(lit) => write!(f, "{}", lit.value),
            Expr::CharLit(lit) => write!(f, "'{}'", escape(lit.value as char, '\'')),
            Expr::StrLit(lit) => {
                let body: String = lit.value.chars().map(|ch| escape(ch, '"')).collect();
                write!(f, "\"{}\"", body)
            }
            Expr::True(_) => write!(f, "true"),
            Expr::False(_) => write!(f, "false"),
            Expr::NullPtr(_) => write!(f, "NULLPTR"),
            Expr::LValue(lvalue) => write!(f, "{}", lvalue),
            Expr::Assign(assign) => write!(f, "{} = {}", assign.dst, assign.src),
            Expr::Call(call) => {
                let args: Vec<String> = call.args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}({})", call.callee, args.join(", "))
            }
            Expr::Unary(unary) => {
                write!(f, "{}{}", unary.op.symbol(), operand(&unary.operand, true))
            }
            Expr::Binary(binary) => write!(
                f,
                "{} {} {}",
                operand(&binary.left, false),
                binary.op.symbol(),
                operand(&binary.right, false)
            ),
        }
    }
}
