//! Grammar productions for the declaration language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Declarations are interfaces, type aliases, and imports; type expressions
//! follow the usual precedence: union < intersection < array postfix < primary.

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{DECL_RECOVERY, MEMBER_NAME_FIRST, MEMBER_RECOVERY, TYPE_FIRST};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        while !self.eof() {
            match self.peek() {
                SyntaxKind::KwImport => self.parse_import(),
                SyntaxKind::KwExport | SyntaxKind::KwInterface | SyntaxKind::KwType => {
                    self.parse_decl()
                }
                _ => {
                    self.error_and_bump_msg(
                        DiagnosticKind::ExpectedDeclaration,
                        "expected `import`, `interface`, or `type`",
                    );
                }
            }
        }

        // Trailing trivia must land inside the root before it closes.
        self.drain_trivia();
        self.finish_node();
    }

    /// `import { A, B } from "./module";`
    fn parse_import(&mut self) {
        self.start_node(SyntaxKind::ImportDecl);
        self.bump(); // `import`

        if self.expect(SyntaxKind::BraceOpen, "`{` after `import`") {
            while !self.eof() && !self.at(SyntaxKind::BraceClose) {
                if self.at(SyntaxKind::Id) {
                    self.bump();
                    if !self.at(SyntaxKind::BraceClose) {
                        self.expect(SyntaxKind::Comma, "`,` between imported names");
                    }
                } else {
                    self.error_and_bump(DiagnosticKind::ExpectedIdentifier);
                }
            }
            self.expect(SyntaxKind::BraceClose, "`}` to close the import list");
        }

        self.expect(SyntaxKind::KwFrom, "`from` after the import list");
        self.expect(SyntaxKind::StringLiteral, "a module path string");
        self.eat(SyntaxKind::Semi);

        self.finish_node();
    }

    /// `export? interface Name ...` | `export? type Name = ...`
    fn parse_decl(&mut self) {
        let checkpoint = self.checkpoint();
        let exported = self.eat(SyntaxKind::KwExport);

        match self.peek() {
            SyntaxKind::KwInterface => {
                self.start_node_at(checkpoint, SyntaxKind::InterfaceDecl);
                self.parse_interface_body();
                self.finish_node();
            }
            SyntaxKind::KwType => {
                self.start_node_at(checkpoint, SyntaxKind::AliasDecl);
                self.parse_alias_body();
                self.finish_node();
            }
            _ => {
                if exported {
                    self.error_msg(
                        DiagnosticKind::ExpectedDeclaration,
                        "expected `interface` or `type` after `export`",
                    );
                    self.recover_until(DECL_RECOVERY);
                } else {
                    self.error_and_bump(DiagnosticKind::ExpectedDeclaration);
                }
            }
        }
    }

    fn parse_interface_body(&mut self) {
        self.bump(); // `interface`
        self.expect(SyntaxKind::Id, "an interface name");

        if self.at(SyntaxKind::KwExtends) {
            self.start_node(SyntaxKind::ExtendsClause);
            self.bump();
            self.expect(SyntaxKind::Id, "a base interface name");
            self.finish_node();
        }

        if self.at(SyntaxKind::BraceOpen) {
            self.parse_object_type();
        } else {
            self.error_msg(DiagnosticKind::ExpectedToken, "expected `{` to open the interface body");
            self.recover_until(DECL_RECOVERY);
        }
    }

    fn parse_alias_body(&mut self) {
        self.bump(); // `type`
        self.expect(SyntaxKind::Id, "an alias name");
        self.expect(SyntaxKind::Equals, "`=` after the alias name");

        if self.at_one_of(TYPE_FIRST) {
            self.parse_type();
        } else {
            self.error(DiagnosticKind::ExpectedType);
            self.recover_until(DECL_RECOVERY);
        }
        self.eat(SyntaxKind::Semi);
    }

    /// `{ name?: Type; #hidden: Type; "quoted": Type }`
    fn parse_object_type(&mut self) {
        self.start_node(SyntaxKind::ObjectType);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // `{`

        loop {
            if self.at(SyntaxKind::BraceClose) {
                self.pop_delimiter();
                self.bump();
                break;
            }
            if self.eof() {
                if let Some(open) = self.pop_delimiter() {
                    self.error_unclosed(DiagnosticKind::UnclosedBrace, open);
                }
                break;
            }
            if self.at_one_of(MEMBER_NAME_FIRST) {
                self.parse_member();
            } else {
                self.error_and_bump(DiagnosticKind::ExpectedMemberName);
            }
        }

        self.finish_node();
    }

    fn parse_member(&mut self) {
        self.start_node(SyntaxKind::Member);
        self.bump(); // member name (Id, PrivateId, string, or contextual keyword)

        self.eat(SyntaxKind::Question);

        if self.expect(SyntaxKind::Colon, "`:` after the member name") {
            if self.at_one_of(TYPE_FIRST) {
                self.parse_type();
            } else {
                self.error(DiagnosticKind::ExpectedType);
                self.recover_until(MEMBER_RECOVERY);
            }
        } else {
            self.recover_until(MEMBER_RECOVERY);
        }

        if !self.eat(SyntaxKind::Semi) {
            self.eat(SyntaxKind::Comma);
        }
        self.finish_node();
    }

    /// Union: `A | B | C`
    pub(super) fn parse_type(&mut self) {
        if !self.enter_recursion() {
            self.recover_until(MEMBER_RECOVERY);
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_intersection();

        if self.at(SyntaxKind::Pipe) {
            self.start_node_at(checkpoint, SyntaxKind::UnionType);
            while self.eat(SyntaxKind::Pipe) {
                if self.at_one_of(TYPE_FIRST) {
                    self.parse_intersection();
                } else {
                    self.error_msg(DiagnosticKind::ExpectedType, "expected a type after `|`");
                    break;
                }
            }
            self.finish_node();
        }

        self.exit_recursion();
    }

    /// Intersection: `A & B`
    fn parse_intersection(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_postfix();

        if self.at(SyntaxKind::Amp) {
            self.start_node_at(checkpoint, SyntaxKind::IntersectionType);
            while self.eat(SyntaxKind::Amp) {
                if self.at_one_of(TYPE_FIRST) {
                    self.parse_postfix();
                } else {
                    self.error_msg(DiagnosticKind::ExpectedType, "expected a type after `&`");
                    break;
                }
            }
            self.finish_node();
        }
    }

    /// Array postfix: `T[]`, `T[][]`
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();

        while self.at(SyntaxKind::BracketOpen) && self.peek_nth(1) == SyntaxKind::BracketClose {
            self.start_node_at(checkpoint, SyntaxKind::ArrayType);
            self.bump(); // `[`
            self.bump(); // `]`
            self.finish_node();
        }
    }

    fn parse_primary(&mut self) {
        match self.peek() {
            SyntaxKind::BraceOpen => self.parse_object_type(),
            SyntaxKind::BracketOpen => self.parse_tuple(),
            SyntaxKind::ParenOpen => self.parse_func_or_paren(),
            SyntaxKind::StringLiteral
            | SyntaxKind::NumberLiteral
            | SyntaxKind::KwTrue
            | SyntaxKind::KwFalse => {
                self.start_node(SyntaxKind::LiteralType);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Id => {
                self.start_node(SyntaxKind::TypeRef);
                self.bump();
                self.finish_node();
            }
            _ => {
                self.error_and_bump(DiagnosticKind::ExpectedType);
            }
        }
    }

    /// `[A, B, C]`
    fn parse_tuple(&mut self) {
        self.start_node(SyntaxKind::TupleType);
        self.push_delimiter(SyntaxKind::BracketOpen);
        self.bump(); // `[`

        loop {
            if self.at(SyntaxKind::BracketClose) {
                self.pop_delimiter();
                self.bump();
                break;
            }
            if self.eof() {
                if let Some(open) = self.pop_delimiter() {
                    self.error_unclosed(DiagnosticKind::UnclosedBracket, open);
                }
                break;
            }
            if self.at_one_of(TYPE_FIRST) {
                self.parse_type();
                if !self.at(SyntaxKind::BracketClose) {
                    self.expect(SyntaxKind::Comma, "`,` between tuple elements");
                }
            } else {
                self.error_and_bump(DiagnosticKind::ExpectedType);
            }
        }

        self.finish_node();
    }

    /// Disambiguates `(msg: string) => void` from `(A | B)`.
    ///
    /// A parenthesized group is a function type iff it is empty (`() => T`)
    /// or its first token pair is `name :`.
    fn parse_func_or_paren(&mut self) {
        let is_func = self.peek_nth(1) == SyntaxKind::ParenClose
            || (self.peek_nth(1) == SyntaxKind::Id && self.peek_nth(2) == SyntaxKind::Colon);

        if is_func {
            self.parse_func_type();
        } else {
            self.parse_paren_type();
        }
    }

    fn parse_func_type(&mut self) {
        self.start_node(SyntaxKind::FuncType);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // `(`

        loop {
            if self.at(SyntaxKind::ParenClose) {
                self.pop_delimiter();
                self.bump();
                break;
            }
            if self.eof() {
                if let Some(open) = self.pop_delimiter() {
                    self.error_unclosed(DiagnosticKind::UnclosedParen, open);
                }
                break;
            }
            if self.at(SyntaxKind::Id) {
                self.start_node(SyntaxKind::Param);
                self.bump();
                self.eat(SyntaxKind::Question);
                if self.expect(SyntaxKind::Colon, "`:` after the parameter name")
                    && self.at_one_of(TYPE_FIRST)
                {
                    self.parse_type();
                }
                self.finish_node();
                if !self.at(SyntaxKind::ParenClose) {
                    self.expect(SyntaxKind::Comma, "`,` between parameters");
                }
            } else {
                self.error_and_bump(DiagnosticKind::ExpectedIdentifier);
            }
        }

        if self.expect(SyntaxKind::Arrow, "`=>` after the parameter list") {
            if self.at_one_of(TYPE_FIRST) {
                self.parse_type();
            } else {
                self.error_msg(DiagnosticKind::ExpectedType, "expected a return type");
            }
        }
        self.finish_node();
    }

    fn parse_paren_type(&mut self) {
        self.start_node(SyntaxKind::ParenType);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // `(`

        if self.at_one_of(TYPE_FIRST) {
            self.parse_type();
        } else {
            self.error(DiagnosticKind::ExpectedType);
        }

        if self.at(SyntaxKind::ParenClose) {
            self.pop_delimiter();
            self.bump();
        } else if let Some(open) = self.pop_delimiter() {
            self.error_unclosed(DiagnosticKind::UnclosedParen, open);
        }

        self.finish_node();
    }
}
