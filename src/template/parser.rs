//! Recursive-descent parser over the lexer's token stream.
//!
//! Operator precedence, loosest first:
//! inline `if` < `or` < `and` < `not` < `in` < `is` < comparisons < `~`
//! < `+ -` < `* / // %` < `**` < unary `- +` < filters `|` < postfix
//! (call, `.name`, `[expr]`).

use super::TemplateError;
use super::lexer::{Spanned, Token};
use super::nodes::{
    BinaryOp, ImportName, KeywordArg, Literal, LoopKind, Node, NodeKind, Pair, SetValue,
    SwitchCase, UnaryOp,
};

type ParseResult<T> = Result<T, TemplateError>;

pub struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with `Token::Eof`, as produced by `lexer::tokenize`.
    pub fn new(tokens: &'a [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_root(&mut self) -> ParseResult<Node> {
        let (children, _) = self.parse_nodes(&[])?;
        Ok(Node::new(NodeKind::Root(children), 1, 1))
    }

    // -- Token helpers -------------------------------------------

    fn cur(&self) -> &'a Spanned {
        let tokens: &'a [Spanned] = self.tokens;
        &tokens[self.pos.min(tokens.len().saturating_sub(1))]
    }

    fn peek(&self) -> &'a Token {
        &self.cur().token
    }

    fn peek_nth(&self, n: usize) -> &'a Token {
        let tokens: &'a [Spanned] = self.tokens;
        &tokens[(self.pos + n).min(tokens.len().saturating_sub(1))].token
    }

    fn prev(&self) -> &'a Spanned {
        let tokens: &'a [Spanned] = self.tokens;
        &tokens[self.pos.saturating_sub(1)]
    }

    fn advance(&mut self) -> &'a Spanned {
        let tok = self.cur();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, message: impl Into<String>) -> TemplateError {
        let cur = self.cur();
        TemplateError::new(message, cur.line, cur.col)
    }

    fn is_name(&self, word: &str) -> bool {
        matches!(self.peek(), Token::Name(name) if name == word)
    }

    fn is_punct(&self, punct: &str) -> bool {
        matches!(self.peek(), Token::Punct(p) if *p == punct)
    }

    fn skip_name(&mut self, word: &str) -> bool {
        let found = self.is_name(word);
        if found {
            self.advance();
        }
        found
    }

    fn skip_punct(&mut self, punct: &str) -> bool {
        let found = self.is_punct(punct);
        if found {
            self.advance();
        }
        found
    }

    fn expect_name(&mut self, word: &str) -> ParseResult<()> {
        if self.skip_name(word) {
            Ok(())
        } else {
            Err(self.err(format!("expected '{word}', got {}", describe(self.peek()))))
        }
    }

    fn expect_punct(&mut self, punct: &str) -> ParseResult<()> {
        if self.skip_punct(punct) {
            Ok(())
        } else {
            Err(self.err(format!("expected '{punct}', got {}", describe(self.peek()))))
        }
    }

    fn take_name(&mut self) -> ParseResult<String> {
        match self.peek() {
            Token::Name(name) => {
                self.advance();
                Ok(name.clone())
            }
            other => Err(self.err(format!("expected name, got {}", describe(other)))),
        }
    }

    fn expect_block_end(&mut self) -> ParseResult<()> {
        if matches!(self.peek(), Token::BlockEnd) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '%}}', got {}", describe(self.peek()))))
        }
    }

    // -- Template structure --------------------------------------

    /// Parse template content until one of the `ends` block tags.
    ///
    /// The matched end tag's `{%` and name are consumed; the rest of that
    /// tag is left to the caller. With no `ends`, parses to end of input.
    fn parse_nodes(&mut self, ends: &[&str]) -> ParseResult<(Vec<Node>, Option<String>)> {
        let mut nodes = Vec::new();
        loop {
            let tok = self.cur();
            match &tok.token {
                Token::Data(text) => {
                    self.advance();
                    nodes.push(Node::new(NodeKind::Data(text.clone()), tok.line, tok.col));
                }
                Token::VariableStart => {
                    self.advance();
                    let expr = self.parse_expression()?;
                    if !matches!(self.peek(), Token::VariableEnd) {
                        return Err(self.err(format!(
                            "expected '}}}}', got {}",
                            describe(self.peek())
                        )));
                    }
                    self.advance();
                    nodes.push(Node::new(
                        NodeKind::Output(Box::new(expr)),
                        tok.line,
                        tok.col,
                    ));
                }
                Token::BlockStart => {
                    if let Token::Name(name) = self.peek_nth(1)
                        && ends.contains(&name.as_str())
                    {
                        self.advance();
                        self.advance();
                        return Ok((nodes, Some(name.clone())));
                    }
                    nodes.push(self.parse_statement()?);
                }
                Token::Eof if ends.is_empty() => return Ok((nodes, None)),
                Token::Eof => {
                    return Err(self.err(format!(
                        "unexpected end of template, expected {}",
                        ends.join(" or ")
                    )));
                }
                other => return Err(self.err(format!("unexpected {}", describe(other)))),
            }
        }
    }

    fn parse_statement(&mut self) -> ParseResult<Node> {
        let start = self.advance();
        let (line, col) = (start.line, start.col);
        let tag = match self.peek() {
            Token::Name(name) => name.clone(),
            other => return Err(self.err(format!("expected block tag, got {}", describe(other)))),
        };
        self.advance();

        match tag.as_str() {
            "if" | "ifAsync" => self.parse_if(line, col),
            "for" => self.parse_loop(LoopKind::For, "endfor", line, col),
            "asyncEach" => self.parse_loop(LoopKind::AsyncEach, "endeach", line, col),
            "asyncAll" => self.parse_loop(LoopKind::AsyncAll, "endall", line, col),
            "block" => self.parse_block(line, col),
            "macro" => self.parse_macro(line, col),
            "call" => self.parse_call_block(line, col),
            "set" => self.parse_set(line, col),
            "include" => self.parse_include(line, col),
            "import" => self.parse_import(line, col),
            "from" => self.parse_from_import(line, col),
            "extends" => {
                let template = self.parse_expression()?;
                self.expect_block_end()?;
                Ok(Node::new(
                    NodeKind::Extends {
                        template: Box::new(template),
                    },
                    line,
                    col,
                ))
            }
            "filter" => self.parse_filter_block(line, col),
            "switch" => self.parse_switch(line, col),
            other => Err(TemplateError::new(
                format!("unknown block tag '{other}'"),
                self.prev().line,
                self.prev().col,
            )),
        }
    }

    fn parse_if(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let cond = self.parse_expression()?;
        self.expect_block_end()?;
        let (body, end) = self.parse_nodes(&["elif", "elseif", "else", "endif"])?;

        let otherwise = match end.as_deref() {
            Some("elif" | "elseif") => {
                let tag = self.prev();
                vec![self.parse_if(tag.line, tag.col)?]
            }
            Some("else") => {
                self.expect_block_end()?;
                let (otherwise, _) = self.parse_nodes(&["endif"])?;
                self.expect_block_end()?;
                otherwise
            }
            _ => {
                self.expect_block_end()?;
                Vec::new()
            }
        };

        Ok(Node::new(
            NodeKind::If {
                cond: Box::new(cond),
                body,
                otherwise,
            },
            line,
            col,
        ))
    }

    fn parse_loop(
        &mut self,
        kind: LoopKind,
        end_tag: &str,
        line: usize,
        col: usize,
    ) -> ParseResult<Node> {
        let mut targets = Vec::new();
        loop {
            let tok = self.cur();
            let name = self.take_name()?;
            targets.push(Node::new(NodeKind::Symbol(name), tok.line, tok.col));
            if !self.skip_punct(",") {
                break;
            }
        }
        self.expect_name("in")?;
        let iterable = self.parse_expression()?;
        self.expect_block_end()?;

        let (body, end) = self.parse_nodes(&["else", end_tag])?;
        let otherwise = if end.as_deref() == Some("else") {
            self.expect_block_end()?;
            let (otherwise, _) = self.parse_nodes(&[end_tag])?;
            otherwise
        } else {
            Vec::new()
        };
        self.expect_block_end()?;

        Ok(Node::new(
            NodeKind::Loop {
                kind,
                targets,
                iterable: Box::new(iterable),
                body,
                otherwise,
            },
            line,
            col,
        ))
    }

    fn parse_block(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let name = self.take_name()?;
        self.expect_block_end()?;
        let (body, _) = self.parse_nodes(&["endblock"])?;
        // `{% endblock name %}`
        if matches!(self.peek(), Token::Name(_)) {
            self.advance();
        }
        self.expect_block_end()?;
        Ok(Node::new(NodeKind::Block { name, body }, line, col))
    }

    fn parse_macro(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let name = self.take_name()?;
        let params = self.parse_args()?;
        self.expect_block_end()?;
        let (body, _) = self.parse_nodes(&["endmacro"])?;
        self.expect_block_end()?;
        Ok(Node::new(NodeKind::Macro { name, params, body }, line, col))
    }

    fn parse_call_block(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let params = if self.is_punct("(") {
            self.parse_args()?
        } else {
            Vec::new()
        };
        let call = self.parse_expression()?;
        self.expect_block_end()?;
        let (body, _) = self.parse_nodes(&["endcall"])?;
        self.expect_block_end()?;
        Ok(Node::new(
            NodeKind::CallBlock {
                params,
                call: Box::new(call),
                body,
            },
            line,
            col,
        ))
    }

    fn parse_set(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let mut targets = Vec::new();
        loop {
            let tok = self.cur();
            let name = self.take_name()?;
            targets.push(Node::new(NodeKind::Symbol(name), tok.line, tok.col));
            if !self.skip_punct(",") {
                break;
            }
        }

        let value = if self.skip_punct("=") {
            let expr = self.parse_expression()?;
            self.expect_block_end()?;
            SetValue::Expr(Box::new(expr))
        } else {
            self.expect_block_end()?;
            let (body, _) = self.parse_nodes(&["endset"])?;
            self.expect_block_end()?;
            SetValue::Body(body)
        };

        Ok(Node::new(NodeKind::Set { targets, value }, line, col))
    }

    fn parse_include(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let template = self.parse_expression()?;
        let ignore_missing = self.skip_name("ignore");
        if ignore_missing {
            self.expect_name("missing")?;
        }
        self.expect_block_end()?;
        Ok(Node::new(
            NodeKind::Include {
                template: Box::new(template),
                ignore_missing,
            },
            line,
            col,
        ))
    }

    fn parse_import(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let template = self.parse_expression()?;
        self.expect_name("as")?;
        let target = self.take_name()?;
        self.skip_context_modifier()?;
        self.expect_block_end()?;
        Ok(Node::new(
            NodeKind::Import {
                template: Box::new(template),
                target,
            },
            line,
            col,
        ))
    }

    fn parse_from_import(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let template = self.parse_expression()?;
        self.expect_name("import")?;
        let mut names = Vec::new();
        loop {
            let name = self.take_name()?;
            let alias = if self.skip_name("as") {
                Some(self.take_name()?)
            } else {
                None
            };
            names.push(ImportName { name, alias });
            if !self.skip_punct(",") {
                break;
            }
        }
        self.skip_context_modifier()?;
        self.expect_block_end()?;
        Ok(Node::new(
            NodeKind::FromImport {
                template: Box::new(template),
                names,
            },
            line,
            col,
        ))
    }

    /// `with context` / `without context` after an import.
    fn skip_context_modifier(&mut self) -> ParseResult<()> {
        if self.skip_name("with") || self.skip_name("without") {
            self.expect_name("context")?;
        }
        Ok(())
    }

    fn parse_filter_block(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        let name = self.take_name()?;
        let args = if self.is_punct("(") {
            self.parse_args()?
        } else {
            Vec::new()
        };
        self.expect_block_end()?;
        let (body, _) = self.parse_nodes(&["endfilter"])?;
        self.expect_block_end()?;
        Ok(Node::new(NodeKind::FilterBlock { name, args, body }, line, col))
    }

    fn parse_switch(&mut self, line: usize, col: usize) -> ParseResult<Node> {
        const ENDS: &[&str] = &["case", "default", "endswitch"];

        let expr = self.parse_expression()?;
        self.expect_block_end()?;
        // text between `switch` and the first `case` is never rendered
        let (_, mut end) = self.parse_nodes(ENDS)?;

        let mut cases = Vec::new();
        let mut default = Vec::new();
        loop {
            match end.as_deref() {
                Some("case") => {
                    let cond = self.parse_expression()?;
                    self.expect_block_end()?;
                    let (body, next) = self.parse_nodes(ENDS)?;
                    cases.push(SwitchCase { cond, body });
                    end = next;
                }
                Some("default") => {
                    self.expect_block_end()?;
                    let (body, next) = self.parse_nodes(ENDS)?;
                    default = body;
                    end = next;
                }
                _ => {
                    self.expect_block_end()?;
                    break;
                }
            }
        }

        Ok(Node::new(
            NodeKind::Switch {
                expr: Box::new(expr),
                cases,
                default,
            },
            line,
            col,
        ))
    }

    // -- Expressions ---------------------------------------------

    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        self.parse_inline_if()
    }

    fn parse_inline_if(&mut self) -> ParseResult<Node> {
        let body = self.parse_or()?;
        if !self.skip_name("if") {
            return Ok(body);
        }
        let cond = self.parse_or()?;
        let otherwise = if self.skip_name("else") {
            Some(Box::new(self.parse_or()?))
        } else {
            None
        };
        let (line, col) = (body.line, body.col);
        Ok(Node::new(
            NodeKind::InlineIf {
                cond: Box::new(cond),
                body: Box::new(body),
                otherwise,
            },
            line,
            col,
        ))
    }

    fn parse_or(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_and()?;
        while self.skip_name("or") {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_not()?;
        while self.skip_name("and") {
            let right = self.parse_not()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> ParseResult<Node> {
        if self.is_name("not") {
            let tok = self.advance();
            let operand = self.parse_not()?;
            return Ok(unary(UnaryOp::Not, operand, tok));
        }
        self.parse_in()
    }

    fn parse_in(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_is()?;
        loop {
            let op = if self.is_name("not") && matches!(self.peek_nth(1), Token::Name(n) if n == "in")
            {
                self.advance();
                self.advance();
                BinaryOp::NotIn
            } else if self.skip_name("in") {
                BinaryOp::In
            } else {
                break;
            };
            let right = self.parse_is()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_is(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_compare()?;
        while self.skip_name("is") {
            let op = if self.skip_name("not") {
                BinaryOp::IsNot
            } else {
                BinaryOp::Is
            };
            let right = self.parse_compare()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_compare(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_concat()?;
        loop {
            let op = match self.peek() {
                Token::Punct("==" | "===") => BinaryOp::Eq,
                Token::Punct("!=" | "!==") => BinaryOp::NotEq,
                Token::Punct("<") => BinaryOp::Lt,
                Token::Punct(">") => BinaryOp::Gt,
                Token::Punct("<=") => BinaryOp::LtEq,
                Token::Punct(">=") => BinaryOp::GtEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_concat()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_concat(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_additive()?;
        while self.skip_punct("~") {
            let right = self.parse_additive()?;
            left = binary(BinaryOp::Concat, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Punct("+") => BinaryOp::Add,
                Token::Punct("-") => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_pow()?;
        loop {
            let op = match self.peek() {
                Token::Punct("*") => BinaryOp::Mul,
                Token::Punct("/") => BinaryOp::Div,
                Token::Punct("//") => BinaryOp::FloorDiv,
                Token::Punct("%") => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_pow()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_pow(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_unary()?;
        while self.skip_punct("**") {
            let right = self.parse_unary()?;
            left = binary(BinaryOp::Pow, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Node> {
        let op = match self.peek() {
            Token::Punct("-") => Some(UnaryOp::Neg),
            Token::Punct("+") => Some(UnaryOp::Pos),
            _ => None,
        };
        if let Some(op) = op {
            let tok = self.advance();
            let operand = self.parse_unary()?;
            return Ok(unary(op, operand, tok));
        }
        let primary = self.parse_primary()?;
        self.parse_filters(primary)
    }

    fn parse_filters(&mut self, mut node: Node) -> ParseResult<Node> {
        while self.skip_punct("|") {
            let tok = self.cur();
            let mut name = self.take_name()?;
            while self.skip_punct(".") {
                name.push('.');
                name.push_str(&self.take_name()?);
            }
            let args = if self.is_punct("(") {
                self.parse_args()?
            } else {
                Vec::new()
            };
            node = Node::new(
                NodeKind::Filter {
                    name,
                    target: Box::new(node),
                    args,
                },
                tok.line,
                tok.col,
            );
        }
        Ok(node)
    }

    fn parse_primary(&mut self) -> ParseResult<Node> {
        let tok = self.cur();
        let kind = match &tok.token {
            Token::Str(value) => {
                self.advance();
                NodeKind::Literal(Literal::String(value.clone()))
            }
            Token::Int(value) => {
                self.advance();
                NodeKind::Literal(Literal::Number(*value as f64))
            }
            Token::Float(value) => {
                self.advance();
                NodeKind::Literal(Literal::Number(*value))
            }
            Token::Name(name) => {
                self.advance();
                match name.as_str() {
                    "true" | "True" => NodeKind::Literal(Literal::Bool(true)),
                    "false" | "False" => NodeKind::Literal(Literal::Bool(false)),
                    "none" | "None" | "null" => NodeKind::Literal(Literal::None),
                    _ => NodeKind::Symbol(name.clone()),
                }
            }
            Token::Punct("(") => self.parse_group()?,
            Token::Punct("[") => {
                self.advance();
                NodeKind::Array(self.parse_sequence("]")?)
            }
            Token::Punct("{") => self.parse_dict()?,
            other => return Err(self.err(format!("unexpected {}", describe(other)))),
        };
        self.parse_postfix(Node::new(kind, tok.line, tok.col))
    }

    fn parse_postfix(&mut self, mut node: Node) -> ParseResult<Node> {
        loop {
            let (line, col) = (node.line, node.col);
            if self.is_punct("(") {
                let args = self.parse_args()?;
                node = Node::new(
                    NodeKind::Call {
                        callee: Box::new(node),
                        args,
                    },
                    line,
                    col,
                );
            } else if self.skip_punct("[") {
                let key = self.parse_expression()?;
                self.expect_punct("]")?;
                node = lookup(node, key);
            } else if self.is_punct(".") {
                self.advance();
                let tok = self.cur();
                let key = match &tok.token {
                    Token::Name(name) => NodeKind::Literal(Literal::String(name.clone())),
                    Token::Int(index) => NodeKind::Literal(Literal::Number(*index as f64)),
                    other => {
                        return Err(self.err(format!(
                            "expected name after '.', got {}",
                            describe(other)
                        )));
                    }
                };
                self.advance();
                node = lookup(node, Node::new(key, tok.line, tok.col));
            } else {
                return Ok(node);
            }
        }
    }

    /// `( … )` is a group, or a tuple literal when it holds a comma.
    fn parse_group(&mut self) -> ParseResult<NodeKind> {
        self.advance();
        if self.skip_punct(")") {
            return Ok(NodeKind::Array(Vec::new()));
        }
        let first = self.parse_expression()?;
        if !self.skip_punct(",") {
            self.expect_punct(")")?;
            return Ok(NodeKind::Group(Box::new(first)));
        }
        let mut items = vec![first];
        items.extend(self.parse_sequence(")")?);
        Ok(NodeKind::Array(items))
    }

    /// Comma-separated expressions up to `close`, trailing comma allowed.
    fn parse_sequence(&mut self, close: &str) -> ParseResult<Vec<Node>> {
        let mut items = Vec::new();
        while !self.skip_punct(close) {
            items.push(self.parse_expression()?);
            if !self.skip_punct(",") {
                self.expect_punct(close)?;
                break;
            }
        }
        Ok(items)
    }

    fn parse_dict(&mut self) -> ParseResult<NodeKind> {
        self.advance();
        let mut pairs = Vec::new();
        while !self.skip_punct("}") {
            let key = self.parse_expression()?;
            self.expect_punct(":")?;
            let value = self.parse_expression()?;
            pairs.push(Pair { key, value });
            if !self.skip_punct(",") {
                self.expect_punct("}")?;
                break;
            }
        }
        Ok(NodeKind::Dict(pairs))
    }

    /// Parses `( … )` call arguments. Named arguments are gathered into one
    /// trailing `KeywordArgs` node, after every positional argument.
    fn parse_args(&mut self) -> ParseResult<Vec<Node>> {
        self.expect_punct("(")?;
        let mut args = Vec::new();
        let mut kwargs = Vec::new();
        let mut kwargs_pos = None;

        while !self.skip_punct(")") {
            if let Token::Name(name) = self.peek()
                && matches!(self.peek_nth(1), Token::Punct("="))
            {
                let tok = self.cur();
                if kwargs_pos.is_none() {
                    kwargs_pos = Some((tok.line, tok.col));
                }
                self.advance();
                self.advance();
                let value = self.parse_expression()?;
                kwargs.push(KeywordArg {
                    name: name.clone(),
                    value,
                });
            } else {
                args.push(self.parse_expression()?);
            }
            if !self.skip_punct(",") {
                self.expect_punct(")")?;
                break;
            }
        }

        if let Some((line, col)) = kwargs_pos {
            args.push(Node::new(NodeKind::KeywordArgs(kwargs), line, col));
        }
        Ok(args)
    }
}

fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
    let (line, col) = (left.line, left.col);
    Node::new(
        NodeKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        line,
        col,
    )
}

fn unary(op: UnaryOp, operand: Node, tok: &Spanned) -> Node {
    Node::new(
        NodeKind::Unary {
            op,
            operand: Box::new(operand),
        },
        tok.line,
        tok.col,
    )
}

fn lookup(target: Node, key: Node) -> Node {
    let (line, col) = (target.line, target.col);
    Node::new(
        NodeKind::LookupVal {
            target: Box::new(target),
            key: Box::new(key),
        },
        line,
        col,
    )
}

fn describe(token: &Token) -> String {
    match token {
        Token::Data(_) => "template data".to_string(),
        Token::VariableStart => "'{{'".to_string(),
        Token::VariableEnd => "'}}'".to_string(),
        Token::BlockStart => "'{%'".to_string(),
        Token::BlockEnd => "'%}'".to_string(),
        Token::Str(value) => format!("string \"{value}\""),
        Token::Int(value) => format!("number {value}"),
        Token::Float(value) => format!("number {value}"),
        Token::Name(name) => format!("'{name}'"),
        Token::Punct(p) => format!("'{p}'"),
        Token::Eof => "end of template".to_string(),
    }
}
