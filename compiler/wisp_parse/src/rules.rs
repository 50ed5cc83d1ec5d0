//! Pratt handler registry.
//!
//! Every token kind can own a prefix handler (it starts an expression) and
//! an infix handler with a binding precedence (it continues one). The
//! expression loop in `grammar::expr` only consults this table, so adding an
//! operator means registering a handler rather than editing the loop.

use std::fmt;

use wisp_ir::ast::Expr;
use wisp_ir::TokenKind;

use crate::grammar::expr::{infix, primary};
use crate::{PResult, Parser};

/// Binding strength, lowest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Lowest,
    /// `=` and compound assignment, right-associative.
    Assign,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==` `!=`
    Equality,
    /// `<` `<=` `>` `>=`
    Relational,
    /// `+` `-`
    Additive,
    /// `*` `/` `%`
    Multiplicative,
    /// unary `-` `!`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[i]` and `a.b`
    Index,
}

/// Starts an expression at the current token.
pub type PrefixFn = fn(&mut Parser<'_>) -> PResult<Expr>;

/// Continues `left` at the current (operator) token.
pub type InfixFn = fn(&mut Parser<'_>, Expr) -> PResult<Expr>;

#[derive(Copy, Clone, Debug)]
pub struct InfixRule {
    pub handler: InfixFn,
    pub precedence: Precedence,
}

/// Token kind to handler tables.
#[derive(Clone)]
pub struct ParseRules {
    prefix: [Option<PrefixFn>; TokenKind::COUNT],
    infix: [Option<InfixRule>; TokenKind::COUNT],
}

impl ParseRules {
    /// A registry with no handlers.
    pub fn empty() -> Self {
        ParseRules {
            prefix: [None; TokenKind::COUNT],
            infix: [None; TokenKind::COUNT],
        }
    }

    /// The Wisp expression grammar.
    pub fn standard() -> Self {
        use Precedence as P;
        use TokenKind as T;

        let mut rules = Self::empty();

        rules.register_prefix(T::Ident, primary::identifier);
        rules.register_prefix(T::Int, primary::integer);
        rules.register_prefix(T::Float, primary::float);
        rules.register_prefix(T::Str, primary::string);
        rules.register_prefix(T::True, primary::boolean);
        rules.register_prefix(T::False, primary::boolean);
        rules.register_prefix(T::Null, primary::null);
        rules.register_prefix(T::Minus, primary::unary);
        rules.register_prefix(T::Bang, primary::unary);
        rules.register_prefix(T::LParen, primary::group);
        rules.register_prefix(T::LBracket, primary::array);
        rules.register_prefix(T::LBrace, primary::hash);
        rules.register_prefix(T::Fn, primary::function);
        rules.register_prefix(T::This, primary::this);
        rules.register_prefix(T::Super, primary::super_expr);
        rules.register_prefix(T::New, primary::new_instance);
        rules.register_prefix(T::Illegal, primary::illegal);

        for kind in [
            T::Assign,
            T::PlusAssign,
            T::MinusAssign,
            T::StarAssign,
            T::SlashAssign,
            T::PercentAssign,
        ] {
            rules.register_infix(kind, P::Assign, infix::assign);
        }
        rules.register_infix(T::OrOr, P::Or, infix::logical);
        rules.register_infix(T::AndAnd, P::And, infix::logical);
        for kind in [T::Eq, T::NotEq] {
            rules.register_infix(kind, P::Equality, infix::binary);
        }
        for kind in [T::Lt, T::LtEq, T::Gt, T::GtEq] {
            rules.register_infix(kind, P::Relational, infix::binary);
        }
        for kind in [T::Plus, T::Minus] {
            rules.register_infix(kind, P::Additive, infix::binary);
        }
        for kind in [T::Star, T::Slash, T::Percent] {
            rules.register_infix(kind, P::Multiplicative, infix::binary);
        }
        rules.register_infix(T::LParen, P::Call, infix::call);
        rules.register_infix(T::LBracket, P::Index, infix::index);
        rules.register_infix(T::Dot, P::Index, infix::property);

        rules
    }

    /// Install a prefix handler, returning the one it replaces.
    pub fn register_prefix(&mut self, kind: TokenKind, handler: PrefixFn) -> Option<PrefixFn> {
        self.prefix[kind.index()].replace(handler)
    }

    /// Install an infix handler, returning the rule it replaces.
    pub fn register_infix(
        &mut self,
        kind: TokenKind,
        precedence: Precedence,
        handler: InfixFn,
    ) -> Option<InfixRule> {
        self.infix[kind.index()].replace(InfixRule {
            handler,
            precedence,
        })
    }

    #[inline]
    pub fn prefix(&self, kind: TokenKind) -> Option<PrefixFn> {
        self.prefix[kind.index()]
    }

    #[inline]
    pub fn infix(&self, kind: TokenKind) -> Option<InfixRule> {
        self.infix[kind.index()]
    }

    /// Binding precedence of `kind` as an infix operator.
    #[inline]
    pub fn precedence(&self, kind: TokenKind) -> Precedence {
        self.infix(kind).map_or(Precedence::Lowest, |rule| rule.precedence)
    }
}

impl Default for ParseRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for ParseRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.prefix.iter().filter(|h| h.is_some()).count();
        let infix = self.infix.iter().filter(|h| h.is_some()).count();
        f.debug_struct("ParseRules")
            .field("prefix", &prefix)
            .field("infix", &infix)
            .finish()
    }
}
