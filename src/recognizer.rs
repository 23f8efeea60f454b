use std::fmt;

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind, is_color};

/// Grammar productions that can commit and then fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Program,
    AllbugsCode,
    BugDefinition,
    VarDeclaration,
    InitializationBlock,
    FunctionDefinition,
    Block,
    MoveAction,
    MoveToAction,
    TurnAction,
    TurnToAction,
    LineAction,
    AssignmentStatement,
    LoopStatement,
    ExitIfStatement,
    SwitchStatement,
    ReturnStatement,
    DoStatement,
    ColorStatement,
    Expression,
    ArithmeticExpression,
    Term,
    Factor,
    UnsignedFactor,
    ParameterList,
    FunctionCall,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Program => "program",
            Self::AllbugsCode => "Allbugs code",
            Self::BugDefinition => "Bug definition",
            Self::VarDeclaration => "var declaration",
            Self::InitializationBlock => "initialization block",
            Self::FunctionDefinition => "function definition",
            Self::Block => "block",
            Self::MoveAction => "move action",
            Self::MoveToAction => "moveto action",
            Self::TurnAction => "turn action",
            Self::TurnToAction => "turnto action",
            Self::LineAction => "line action",
            Self::AssignmentStatement => "assignment statement",
            Self::LoopStatement => "loop statement",
            Self::ExitIfStatement => "exit if statement",
            Self::SwitchStatement => "switch statement",
            Self::ReturnStatement => "return statement",
            Self::DoStatement => "do statement",
            Self::ColorStatement => "color statement",
            Self::Expression => "expression",
            Self::ArithmeticExpression => "arithmetic expression",
            Self::Term => "term",
            Self::Factor => "factor",
            Self::UnsignedFactor => "unsigned factor",
            Self::ParameterList => "parameter list",
            Self::FunctionCall => "function call",
        };
        f.write_str(name)
    }
}

/// A production committed to an alternative and the input did not
/// continue it. Aborts the whole recognition attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {production}: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub production: Production,
    pub expected: &'static str,
    pub found: String,
    /// 1-based line of the first unread token.
    pub line: usize,
}

impl SyntaxError {
    /// The diagnostic without its line prefix.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{}: expected {}, found {}",
            self.production, self.expected, self.found
        )
    }
}

/// `Ok(true)`: matched and consumed. `Ok(false)`: no match, nothing
/// consumed. `Err`: committed production could not complete.
pub type Recognized = Result<bool, SyntaxError>;

/// Deepest nesting of parentheses, parameter lists and blocks accepted
/// before recognition fails with a `SyntaxError`.
pub const MAX_NESTING: usize = 100;

/// Recursive-descent recognizer for the Bugs language.
///
/// Each `is_*` method matches one nonterminal against the upcoming
/// input.
#[derive(Debug, Clone)]
pub struct Recognizer<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Recognizer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            depth: 0,
        }
    }

    // -- Token stream access, shared with downstream parsers.

    pub fn next_token(&mut self) -> Token {
        self.lexer.next_token()
    }

    pub fn push_back(&mut self) {
        self.lexer.push_back();
    }

    pub fn current_line(&mut self) -> usize {
        self.lexer.current_line()
    }

    /// Consumes the next token if it has the given kind.
    pub fn next_token_matches(&mut self, kind: TokenKind) -> bool {
        let token = self.lexer.next_token();
        if token.kind == kind {
            return true;
        }
        self.lexer.push_back();
        false
    }

    /// Consumes the next token if it has the given kind and text.
    pub fn next_token_matches_text(&mut self, kind: TokenKind, text: &str) -> bool {
        let token = self.lexer.next_token();
        if token.is(kind, text) {
            return true;
        }
        self.lexer.push_back();
        false
    }

    // -- Top level.

    /// `[allbugs-code] bug-definition {bug-definition}`
    ///
    /// Once an `Allbugs` section has been read, a missing Bug
    /// definition is fatal.
    pub fn is_program(&mut self) -> Recognized {
        let has_allbugs = self.is_allbugs_code()?;
        if !self.is_bug_definition()? {
            if has_allbugs {
                return Err(self.error(Production::Program, "Bug definition"));
            }
            return Ok(false);
        }
        while self.is_bug_definition()? {}
        Ok(true)
    }

    /// `"Allbugs" "{" eol {var-declaration} {function-definition} "}" eol`
    pub fn is_allbugs_code(&mut self) -> Recognized {
        const P: Production = Production::AllbugsCode;
        if !self.keyword("Allbugs") {
            return Ok(false);
        }
        self.expect_symbol(P, "{")?;
        self.expect_eol(P)?;
        while self.is_var_declaration()? {}
        while self.is_function_definition()? {}
        self.expect_symbol(P, "}")?;
        self.expect_eol(P)?;
        Ok(true)
    }

    /// `"Bug" name "{" eol {var-declaration} [initialization-block]
    /// command {command} {function-definition} "}" eol`
    pub fn is_bug_definition(&mut self) -> Recognized {
        const P: Production = Production::BugDefinition;
        if !self.keyword("Bug") {
            return Ok(false);
        }
        self.expect_name(P)?;
        self.expect_symbol(P, "{")?;
        self.expect_eol(P)?;
        while self.is_var_declaration()? {}
        self.is_initialization_block()?;
        if !self.is_command()? {
            return Err(self.error(P, "command"));
        }
        while self.is_command()? {}
        while self.is_function_definition()? {}
        self.expect_symbol(P, "}")?;
        self.expect_eol(P)?;
        Ok(true)
    }

    /// `"var" name {"," name} eol`
    pub fn is_var_declaration(&mut self) -> Recognized {
        const P: Production = Production::VarDeclaration;
        if !self.keyword("var") {
            return Ok(false);
        }
        self.expect_name(P)?;
        while self.symbol(",") {
            self.expect_name(P)?;
        }
        self.expect_eol(P)?;
        Ok(true)
    }

    pub fn is_initialization_block(&mut self) -> Recognized {
        if !self.keyword("initially") {
            return Ok(false);
        }
        if !self.is_block()? {
            return Err(self.error(Production::InitializationBlock, "block"));
        }
        Ok(true)
    }

    /// `"define" name ["using" variable {"," variable}] block`
    pub fn is_function_definition(&mut self) -> Recognized {
        const P: Production = Production::FunctionDefinition;
        if !self.keyword("define") {
            return Ok(false);
        }
        self.expect_name(P)?;
        if self.keyword("using") {
            self.expect_variable(P)?;
            while self.symbol(",") {
                self.expect_variable(P)?;
            }
        }
        if !self.is_block()? {
            return Err(self.error(P, "block"));
        }
        Ok(true)
    }

    /// `"{" eol {command} "}" eol`
    pub fn is_block(&mut self) -> Recognized {
        const P: Production = Production::Block;
        if !self.symbol("{") {
            return Ok(false);
        }
        self.nested(P, |r| {
            r.expect_eol(P)?;
            while r.is_command()? {}
            r.expect_symbol(P, "}")?;
            r.expect_eol(P)
        })?;
        Ok(true)
    }

    pub fn is_command(&mut self) -> Recognized {
        Ok(self.is_action()? || self.is_statement()?)
    }

    // -- Actions.

    pub fn is_action(&mut self) -> Recognized {
        Ok(self.is_move_action()?
            || self.is_move_to_action()?
            || self.is_turn_action()?
            || self.is_turn_to_action()?
            || self.is_line_action()?)
    }

    /// `"move" expression eol`
    pub fn is_move_action(&mut self) -> Recognized {
        self.keyword_expression_eol("move", Production::MoveAction)
    }

    /// `"moveto" expression "," expression eol`
    pub fn is_move_to_action(&mut self) -> Recognized {
        const P: Production = Production::MoveToAction;
        if !self.keyword("moveto") {
            return Ok(false);
        }
        self.expect_expression(P)?;
        self.expect_symbol(P, ",")?;
        self.expect_expression(P)?;
        self.expect_eol(P)?;
        Ok(true)
    }

    /// `"turn" expression eol`
    pub fn is_turn_action(&mut self) -> Recognized {
        self.keyword_expression_eol("turn", Production::TurnAction)
    }

    /// `"turnto" expression eol`
    pub fn is_turn_to_action(&mut self) -> Recognized {
        self.keyword_expression_eol("turnto", Production::TurnToAction)
    }

    /// `"line" expression "," expression "," expression "," expression eol`
    pub fn is_line_action(&mut self) -> Recognized {
        const P: Production = Production::LineAction;
        if !self.keyword("line") {
            return Ok(false);
        }
        self.expect_expression(P)?;
        for _ in 0..3 {
            self.expect_symbol(P, ",")?;
            self.expect_expression(P)?;
        }
        self.expect_eol(P)?;
        Ok(true)
    }

    // -- Statements.

    pub fn is_statement(&mut self) -> Recognized {
        Ok(self.is_assignment_statement()?
            || self.is_loop_statement()?
            || self.is_exit_if_statement()?
            || self.is_switch_statement()?
            || self.is_return_statement()?
            || self.is_do_statement()?
            || self.is_color_statement()?)
    }

    /// `variable "=" expression eol`
    ///
    /// A leading name commits: no other statement starts with one.
    pub fn is_assignment_statement(&mut self) -> Recognized {
        const P: Production = Production::AssignmentStatement;
        if !self.is_variable() {
            return Ok(false);
        }
        self.expect_symbol(P, "=")?;
        self.expect_expression(P)?;
        self.expect_eol(P)?;
        Ok(true)
    }

    pub fn is_loop_statement(&mut self) -> Recognized {
        if !self.keyword("loop") {
            return Ok(false);
        }
        if !self.is_block()? {
            return Err(self.error(Production::LoopStatement, "block"));
        }
        Ok(true)
    }

    /// `"exit" "if" expression eol`
    pub fn is_exit_if_statement(&mut self) -> Recognized {
        const P: Production = Production::ExitIfStatement;
        if !self.keyword("exit") {
            return Ok(false);
        }
        if !self.keyword("if") {
            return Err(self.error(P, "'if'"));
        }
        self.expect_expression(P)?;
        self.expect_eol(P)?;
        Ok(true)
    }

    /// `"switch" "{" eol {"case" expression eol {command}} "}" eol`
    pub fn is_switch_statement(&mut self) -> Recognized {
        const P: Production = Production::SwitchStatement;
        if !self.keyword("switch") {
            return Ok(false);
        }
        self.expect_symbol(P, "{")?;
        self.expect_eol(P)?;
        while self.keyword("case") {
            self.expect_expression(P)?;
            self.expect_eol(P)?;
            while self.is_command()? {}
        }
        self.expect_symbol(P, "}")?;
        self.expect_eol(P)?;
        Ok(true)
    }

    /// `"return" expression eol`
    pub fn is_return_statement(&mut self) -> Recognized {
        self.keyword_expression_eol("return", Production::ReturnStatement)
    }

    /// `"do" variable [parameter-list] eol`
    pub fn is_do_statement(&mut self) -> Recognized {
        const P: Production = Production::DoStatement;
        if !self.keyword("do") {
            return Ok(false);
        }
        self.expect_variable(P)?;
        self.is_parameter_list()?;
        self.expect_eol(P)?;
        Ok(true)
    }

    /// `"color" color eol`, where the color is a keyword or a palette
    /// name.
    pub fn is_color_statement(&mut self) -> Recognized {
        const P: Production = Production::ColorStatement;
        if !self.keyword("color") {
            return Ok(false);
        }
        let token = self.lexer.next_token();
        let is_color_value = token.kind == TokenKind::Keyword
            || (token.kind == TokenKind::Name && is_color(&token.text));
        if !is_color_value {
            self.lexer.push_back();
            return Err(self.error(P, "color"));
        }
        self.expect_eol(P)?;
        Ok(true)
    }

    // -- Expressions.

    /// `arithmetic-expr {comparator arithmetic-expr}`
    pub fn is_expression(&mut self) -> Recognized {
        if !self.is_arithmetic_expression()? {
            return Ok(false);
        }
        while self.is_comparator() {
            if !self.is_arithmetic_expression()? {
                return Err(self.error(Production::Expression, "arithmetic expression"));
            }
        }
        Ok(true)
    }

    /// `term {add-op term}`
    pub fn is_arithmetic_expression(&mut self) -> Recognized {
        if !self.is_term()? {
            return Ok(false);
        }
        while self.is_add_operator() {
            if !self.is_term()? {
                return Err(self.error(Production::ArithmeticExpression, "term"));
            }
        }
        Ok(true)
    }

    /// `factor {mul-op factor}`
    pub fn is_term(&mut self) -> Recognized {
        if !self.is_factor()? {
            return Ok(false);
        }
        while self.is_multiply_operator() {
            if !self.is_factor()? {
                return Err(self.error(Production::Term, "factor"));
            }
        }
        Ok(true)
    }

    /// `[add-op] unsigned-factor`
    pub fn is_factor(&mut self) -> Recognized {
        if self.is_add_operator() {
            if self.is_unsigned_factor()? {
                return Ok(true);
            }
            return Err(self.error(Production::Factor, "operand after unary sign"));
        }
        self.is_unsigned_factor()
    }

    /// `variable ["." name | parameter-list] | number | "(" expression ")"`
    pub fn is_unsigned_factor(&mut self) -> Recognized {
        const P: Production = Production::UnsignedFactor;
        if self.is_variable() {
            if self.symbol(".") {
                if self.name() {
                    return Ok(true);
                }
                return Err(self.error(P, "name after '.'"));
            }
            self.is_parameter_list()?;
            return Ok(true);
        }
        if self.number() {
            return Ok(true);
        }
        if self.symbol("(") {
            self.nested(P, |r| {
                r.expect_expression(P)?;
                r.expect_symbol(P, ")")
            })?;
            return Ok(true);
        }
        Ok(false)
    }

    /// `"(" [expression {"," expression}] ")"`
    pub fn is_parameter_list(&mut self) -> Recognized {
        const P: Production = Production::ParameterList;
        if !self.symbol("(") {
            return Ok(false);
        }
        self.nested(P, |r| {
            if r.is_expression()? {
                while r.symbol(",") {
                    r.expect_expression(P)?;
                }
            }
            r.expect_symbol(P, ")")
        })?;
        Ok(true)
    }

    /// `name parameter-list`
    pub fn is_function_call(&mut self) -> Recognized {
        if !self.is_variable() {
            return Ok(false);
        }
        if !self.is_parameter_list()? {
            return Err(self.error(Production::FunctionCall, "parameter list"));
        }
        Ok(true)
    }

    /// `"<" ["="] | "=" | "!" ["="] | ">" ["="]`
    ///
    /// A bare `!` is accepted like a bare `<` or `>`.
    pub fn is_comparator(&mut self) -> bool {
        if self.symbol("<") || self.symbol("!") || self.symbol(">") {
            self.symbol("=");
            return true;
        }
        self.symbol("=")
    }

    pub fn is_add_operator(&mut self) -> bool {
        self.symbol("+") || self.symbol("-")
    }

    pub fn is_multiply_operator(&mut self) -> bool {
        self.symbol("*") || self.symbol("/")
    }

    pub fn is_variable(&mut self) -> bool {
        self.name()
    }

    /// One or more line terminators, matched as a single unit.
    pub fn is_eol(&mut self) -> bool {
        if !self.next_token_matches(TokenKind::EndOfLine) {
            return false;
        }
        while self.next_token_matches(TokenKind::EndOfLine) {}
        true
    }

    // -- Helpers.

    fn name(&mut self) -> bool {
        self.next_token_matches(TokenKind::Name)
    }

    fn number(&mut self) -> bool {
        self.next_token_matches(TokenKind::Number)
    }

    fn keyword(&mut self, keyword: &str) -> bool {
        self.next_token_matches_text(TokenKind::Keyword, keyword)
    }

    fn symbol(&mut self, symbol: &str) -> bool {
        self.next_token_matches_text(TokenKind::Symbol, symbol)
    }

    fn keyword_expression_eol(&mut self, keyword: &str, production: Production) -> Recognized {
        if !self.keyword(keyword) {
            return Ok(false);
        }
        self.expect_expression(production)?;
        self.expect_eol(production)?;
        Ok(true)
    }

    fn expect_symbol(
        &mut self,
        production: Production,
        symbol: &'static str,
    ) -> Result<(), SyntaxError> {
        if self.symbol(symbol) {
            return Ok(());
        }
        let expected = match symbol {
            "{" => "'{'",
            "}" => "'}'",
            "(" => "'('",
            ")" => "')'",
            "," => "','",
            "=" => "'='",
            _ => "symbol",
        };
        Err(self.error(production, expected))
    }

    fn expect_name(&mut self, production: Production) -> Result<(), SyntaxError> {
        if self.name() {
            return Ok(());
        }
        Err(self.error(production, "name"))
    }

    fn expect_variable(&mut self, production: Production) -> Result<(), SyntaxError> {
        if self.is_variable() {
            return Ok(());
        }
        Err(self.error(production, "variable"))
    }

    fn expect_expression(&mut self, production: Production) -> Result<(), SyntaxError> {
        if self.is_expression()? {
            return Ok(());
        }
        Err(self.error(production, "expression"))
    }

    fn expect_eol(&mut self, production: Production) -> Result<(), SyntaxError> {
        if self.is_eol() {
            return Ok(());
        }
        Err(self.error(production, "end of line"))
    }

    fn nested(
        &mut self,
        production: Production,
        body: impl FnOnce(&mut Self) -> Result<(), SyntaxError>,
    ) -> Result<(), SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(production, "shallower nesting"));
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    // Reports against the next unread token, which stays unread.
    fn error(&mut self, production: Production, expected: &'static str) -> SyntaxError {
        let found = self.lexer.next_token();
        self.lexer.push_back();
        SyntaxError {
            production,
            expected,
            found: found.to_string(),
            line: self.lexer.current_line(),
        }
    }
}
