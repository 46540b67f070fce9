//! Selector parsing and matching
//!
//! Implements the Selectors Level 3 grammar together with `:is()`,
//! `:where()`, `:has()` and selector lists inside `:not()`. Syntax that
//! `querySelectorAll` would throw on (unknown pseudo-classes, undeclared
//! namespace prefixes, malformed tokens) is a `SelectorParseError`.
//! Pseudo-elements parse but never match, since only elements are
//! returned from a query.

use crate::{DomTree, ElementData, Node, NodeId};

/// Selector syntax error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} at offset {offset}")]
pub struct SelectorParseError {
    /// Byte offset of the offending input
    pub offset: usize,
    /// What went wrong
    pub reason: String,
}

impl SelectorParseError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self { offset, reason: reason.into() }
    }
}

type ParseResult<T> = Result<T, SelectorParseError>;

/// Attribute selector operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOperator {
    /// `[a]`
    Exists,
    /// `[a=v]`
    Equals,
    /// `[a~=v]`, whitespace-separated word
    Includes,
    /// `[a|=v]`, exact or followed by `-`
    DashMatch,
    /// `[a^=v]`
    Prefix,
    /// `[a$=v]`
    Suffix,
    /// `[a*=v]`
    Substring,
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    /// Lower-case attribute name
    pub name: String,
    pub operator: AttrOperator,
    /// Empty for `Exists`
    pub value: String,
    /// The `i` flag
    pub case_insensitive: bool,
}

impl AttrSelector {
    fn matches(&self, elem: &ElementData) -> bool {
        let Some(actual) = elem.get_attr(&self.name) else {
            return false;
        };
        if self.operator == AttrOperator::Exists {
            return true;
        }

        let (actual, expected) = if self.case_insensitive {
            (actual.to_ascii_lowercase(), self.value.to_ascii_lowercase())
        } else {
            (actual.to_string(), self.value.clone())
        };
        let (actual, expected) = (actual.as_str(), expected.as_str());

        match self.operator {
            AttrOperator::Exists => true,
            AttrOperator::Equals => actual == expected,
            AttrOperator::Includes => {
                !expected.is_empty()
                    && !expected.contains(|c: char| c.is_ascii_whitespace())
                    && actual.split_ascii_whitespace().any(|word| word == expected)
            }
            AttrOperator::DashMatch => {
                actual == expected
                    || actual.strip_prefix(expected).is_some_and(|rest| rest.starts_with('-'))
            }
            AttrOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
            AttrOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
            AttrOperator::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

/// `An+B` argument of the `:nth-*` pseudo-classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nth {
    pub a: i32,
    pub b: i32,
}

impl Nth {
    /// Whether a 1-based `position` is `a*n + b` for some `n >= 0`
    pub fn matches(self, position: usize) -> bool {
        let (a, b) = (i64::from(self.a), i64::from(self.b));
        let diff = position as i64 - b;
        if a == 0 {
            return diff == 0;
        }
        diff % a == 0 && diff / a >= 0
    }

    fn parse(text: &str) -> Option<Self> {
        let text = text.trim().to_ascii_lowercase();
        match text.as_str() {
            "odd" => return Some(Self { a: 2, b: 1 }),
            "even" => return Some(Self { a: 2, b: 0 }),
            _ => {}
        }

        let Some(n_at) = text.find('n') else {
            return parse_int(&text, true).map(|b| Self { a: 0, b });
        };
        let a = match &text[..n_at] {
            "" | "+" => 1,
            "-" => -1,
            coefficient => parse_int(coefficient, true)?,
        };

        let rest = text[n_at + 1..].trim_start();
        if rest.is_empty() {
            return Some(Self { a, b: 0 });
        }
        let (sign, digits) = if let Some(digits) = rest.strip_prefix('+') {
            (1, digits)
        } else if let Some(digits) = rest.strip_prefix('-') {
            (-1, digits)
        } else {
            return None;
        };
        let b = parse_int(digits.trim_start(), false)?;
        Some(Self { a, b: sign * b })
    }
}

fn parse_int(text: &str, signed: bool) -> Option<i32> {
    let digits = if signed {
        text.strip_prefix(['+', '-']).unwrap_or(text)
    } else {
        text
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Pseudo-class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(Nth),
    NthLastChild(Nth),
    NthOfType(Nth),
    NthLastOfType(Nth),
    Not(SelectorList),
    /// `:is()` and `:where()`
    Is(SelectorList),
    Has(Vec<RelativeSelector>),
    /// `:link` and `:any-link`; nothing is ever visited
    AnyLink,
    Checked,
    Disabled,
    Enabled,
    Required,
    Optional,
    Lang(String),
    /// User-interaction state (`:hover`, `:focus`, ...) a static document
    /// is never in
    Dynamic(String),
}

impl PseudoClass {
    fn matches(&self, tree: &DomTree, node: NodeId, elem: &ElementData) -> bool {
        let same_type = |n: &NodeId| element(tree, *n).is_some_and(|e| e.tag == elem.tag);
        match self {
            Self::Root => tree.get(node).is_some_and(|n| n.parent == tree.root()),
            Self::Empty => tree
                .children(node)
                .all(|(_, child)| !child.is_element() && child.as_text().is_none_or(str::is_empty)),
            Self::FirstChild => prev_elements(tree, node).next().is_none(),
            Self::LastChild => next_elements(tree, node).next().is_none(),
            Self::OnlyChild => {
                prev_elements(tree, node).next().is_none() && next_elements(tree, node).next().is_none()
            }
            Self::FirstOfType => !prev_elements(tree, node).any(|n| same_type(&n)),
            Self::LastOfType => !next_elements(tree, node).any(|n| same_type(&n)),
            Self::OnlyOfType => {
                !prev_elements(tree, node).any(|n| same_type(&n))
                    && !next_elements(tree, node).any(|n| same_type(&n))
            }
            Self::NthChild(nth) => nth.matches(1 + prev_elements(tree, node).count()),
            Self::NthLastChild(nth) => nth.matches(1 + next_elements(tree, node).count()),
            Self::NthOfType(nth) => {
                nth.matches(1 + prev_elements(tree, node).filter(same_type).count())
            }
            Self::NthLastOfType(nth) => {
                nth.matches(1 + next_elements(tree, node).filter(same_type).count())
            }
            Self::Not(list) => !list.matches(tree, node),
            Self::Is(list) => list.matches(tree, node),
            Self::Has(relative) => relative.iter().any(|r| r.matches(tree, node)),
            Self::AnyLink => {
                matches!(elem.tag.as_str(), "a" | "area") && elem.get_attr("href").is_some()
            }
            Self::Checked => match elem.tag.as_str() {
                "input" => {
                    elem.get_attr("type").is_some_and(|t| {
                        t.eq_ignore_ascii_case("checkbox") || t.eq_ignore_ascii_case("radio")
                    }) && elem.get_attr("checked").is_some()
                }
                "option" => elem.get_attr("selected").is_some(),
                _ => false,
            },
            Self::Disabled => is_form_control(elem) && is_disabled(tree, node, elem),
            Self::Enabled => is_form_control(elem) && !is_disabled(tree, node, elem),
            Self::Required => accepts_input(elem) && elem.get_attr("required").is_some(),
            Self::Optional => accepts_input(elem) && elem.get_attr("required").is_none(),
            Self::Lang(range) => {
                let lang = std::iter::once(node)
                    .chain(tree.ancestors(node))
                    .find_map(|n| element(tree, n)?.get_attr("lang"));
                lang.is_some_and(|lang| {
                    let (lang, range) = (lang.to_ascii_lowercase(), range.to_ascii_lowercase());
                    lang == range || lang.strip_prefix(&range).is_some_and(|r| r.starts_with('-'))
                })
            }
            Self::Dynamic(_) => false,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "root" => Self::Root,
            "empty" => Self::Empty,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "first-of-type" => Self::FirstOfType,
            "last-of-type" => Self::LastOfType,
            "only-of-type" => Self::OnlyOfType,
            "link" | "any-link" => Self::AnyLink,
            "checked" => Self::Checked,
            "disabled" => Self::Disabled,
            "enabled" => Self::Enabled,
            "required" => Self::Required,
            "optional" => Self::Optional,
            "active" | "focus" | "focus-visible" | "focus-within" | "hover" | "target"
            | "visited" | "indeterminate" => Self::Dynamic(name.to_string()),
            _ => return None,
        })
    }
}

fn is_form_control(elem: &ElementData) -> bool {
    matches!(
        elem.tag.as_str(),
        "button" | "input" | "select" | "textarea" | "optgroup" | "option" | "fieldset"
    )
}

fn accepts_input(elem: &ElementData) -> bool {
    matches!(elem.tag.as_str(), "input" | "select" | "textarea")
}

/// Own `disabled` attribute or inside a disabled `<fieldset>`
fn is_disabled(tree: &DomTree, node: NodeId, elem: &ElementData) -> bool {
    elem.get_attr("disabled").is_some()
        || tree.ancestors(node).any(|a| {
            element(tree, a).is_some_and(|e| e.tag == "fieldset" && e.get_attr("disabled").is_some())
        })
}

/// Namespace constraint of a type selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Namespace {
    /// No prefix or `*|`
    #[default]
    Any,
    /// `|tag`: elements without a namespace. Every element of this
    /// document is in the HTML namespace, so this never matches.
    Empty,
}

/// Compound selector, e.g. `input.big[type=button]:not(:disabled)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub namespace: Namespace,
    /// Lower-case type selector; `None` for `*` or when omitted
    pub tag: Option<String>,
    /// `#a#b` is legal syntax, so more than one id may be required
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
    pub pseudo_classes: Vec<PseudoClass>,
    /// Lower-case name; a compound with a pseudo-element matches nothing
    pub pseudo_element: Option<String>,
}

impl Compound {
    /// Check a single element against this compound
    pub fn matches(&self, tree: &DomTree, node: NodeId, elem: &ElementData) -> bool {
        if self.namespace == Namespace::Empty || self.pseudo_element.is_some() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !elem.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.ids.iter().all(|id| elem.id.as_deref() == Some(id.as_str()))
            && self.classes.iter().all(|c| elem.has_class(c))
            && self.attrs.iter().all(|a| a.matches(elem))
            && self.pseudo_classes.iter().all(|p| p.matches(tree, node, elem))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

impl Combinator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Child),
            '+' => Some(Self::NextSibling),
            '~' => Some(Self::SubsequentSibling),
            _ => None,
        }
    }

    /// Nodes that may stand on the left of this combinator when `node`
    /// stands on the right
    fn left_of(self, tree: &DomTree, node: NodeId) -> Vec<NodeId> {
        match self {
            Self::Descendant => tree.ancestors(node).collect(),
            Self::Child => tree.ancestors(node).take(1).collect(),
            Self::NextSibling => prev_elements(tree, node).take(1).collect(),
            Self::SubsequentSibling => prev_elements(tree, node).collect(),
        }
    }
}

/// Compounds joined by combinators; `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

impl ComplexSelector {
    /// `anchor` ties the leftmost compound to the `:has()` subject
    fn matches_at(
        &self,
        tree: &DomTree,
        idx: usize,
        node: NodeId,
        anchor: Option<(Combinator, NodeId)>,
    ) -> bool {
        let Some(elem) = element(tree, node) else {
            return false;
        };
        if !self.compounds[idx].matches(tree, node, elem) {
            return false;
        }
        if idx == 0 {
            return anchor.is_none_or(|(combinator, anchor)| {
                combinator.left_of(tree, node).contains(&anchor)
            });
        }

        self.combinators[idx - 1]
            .left_of(tree, node)
            .into_iter()
            .any(|left| self.matches_at(tree, idx - 1, left, anchor))
    }

    /// Match with the rightmost compound anchored at `node`
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.matches_at(tree, self.compounds.len() - 1, node, None)
    }
}

/// `:has()` argument, e.g. `> img` or `+ .hint`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeSelector {
    /// Leading combinator; `Descendant` when omitted
    pub combinator: Combinator,
    pub selector: ComplexSelector,
}

impl RelativeSelector {
    fn matches(&self, tree: &DomTree, anchor: NodeId) -> bool {
        let scope = match self.combinator {
            Combinator::Descendant | Combinator::Child => anchor,
            Combinator::NextSibling | Combinator::SubsequentSibling => {
                tree.get(anchor).map_or(NodeId::NONE, |n| n.parent)
            }
        };
        if !scope.is_valid() {
            return false;
        }
        let last = self.selector.compounds.len() - 1;
        tree.descendants(scope).into_iter().any(|candidate| {
            self.selector
                .matches_at(tree, last, candidate, Some((self.combinator, anchor)))
        })
    }
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> ParseResult<Self> {
        Parser { input, pos: 0 }.parse_list(false)
    }

    /// Check if an element matches any selector in the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node))
    }
}

fn element(tree: &DomTree, node: NodeId) -> Option<&ElementData> {
    tree.get(node)?.as_element()
}

fn element_siblings(
    tree: &DomTree,
    node: NodeId,
    step: fn(&Node) -> NodeId,
) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(Some(node), move |&cur| tree.get(cur).map(step).filter(|n| n.is_valid()))
        .skip(1)
        .filter(|&n| tree.get(n).is_some_and(Node::is_element))
}

/// Element siblings before `node`, nearest first
fn prev_elements(tree: &DomTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    element_siblings(tree, node, |n| n.prev_sibling)
}

/// Element siblings after `node`, nearest first
fn next_elements(tree: &DomTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    element_siblings(tree, node, |n| n.next_sibling)
}

/// Pseudo-elements also accepted with a single colon
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

const PSEUDO_ELEMENTS: &[&str] = &[
    "before", "after", "first-line", "first-letter", "marker", "placeholder", "selection",
    "backdrop", "file-selector-button",
];

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace, returning whether any was skipped
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn err<T>(&self, reason: impl Into<String>) -> ParseResult<T> {
        Err(SelectorParseError::new(self.pos, reason))
    }

    fn err_at<T>(&mut self, offset: usize, reason: impl Into<String>) -> ParseResult<T> {
        self.pos = offset;
        self.err(reason)
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => self.err(format!("expected '{expected}', found '{c}'")),
            None => self.err(format!("expected '{expected}'")),
        }
    }

    /// `nested` lists sit inside a functional pseudo-class and end at `)`
    fn parse_list(&mut self, nested: bool) -> ParseResult<SelectorList> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex(nested)?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') if nested => break,
                None => break,
                Some(c) => return self.err(format!("unexpected '{c}'")),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self, nested: bool) -> ParseResult<ComplexSelector> {
        let mut compounds = vec![self.parse_compound(nested)?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',' | ')') => break,
                Some(c) => match Combinator::from_char(c) {
                    Some(combinator) => combinator,
                    None if had_ws => Combinator::Descendant,
                    None => return self.err(format!("unexpected '{c}'")),
                },
            };
            if compounds.last().is_some_and(|c| c.pseudo_element.is_some()) {
                return self.err("pseudo-element must end the selector");
            }
            if combinator != Combinator::Descendant {
                self.bump();
                self.skip_ws();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound(nested)?);
        }

        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self, nested: bool) -> ParseResult<Compound> {
        let start = self.pos;
        let mut compound = Compound::default();
        self.parse_type(&mut compound)?;

        loop {
            if compound.pseudo_element.is_some() && matches!(self.peek(), Some('#' | '.' | '[' | ':')) {
                return self.err("pseudo-element must end the selector");
            }
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.ids.push(self.parse_ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attrs.push(self.parse_attr()?);
                }
                Some(':') => self.parse_pseudo(&mut compound, nested)?,
                _ => break,
            }
        }

        if self.pos == start {
            return match self.peek() {
                None => self.err("expected selector"),
                Some(c) => self.err(format!("unexpected '{c}'")),
            };
        }
        Ok(compound)
    }

    /// Optional `[prefix|](name|*)` at the start of a compound
    fn parse_type(&mut self, compound: &mut Compound) -> ParseResult<()> {
        let start = self.pos;
        // None: nothing, Some(None): `*`, Some(Some(name)): identifier
        let head = match self.peek() {
            Some('*') => {
                self.bump();
                Some(None)
            }
            _ if self.at_ident() => Some(Some(self.parse_ident()?)),
            _ => None,
        };

        if self.peek() != Some('|') {
            compound.tag = head.flatten().map(|t| t.to_ascii_lowercase());
            return Ok(());
        }

        self.bump();
        compound.namespace = match head {
            None => Namespace::Empty,
            Some(None) => Namespace::Any,
            Some(Some(prefix)) => {
                return self.err_at(start, format!("undeclared namespace prefix '{prefix}'"));
            }
        };
        compound.tag = match self.peek() {
            Some('*') => {
                self.bump();
                None
            }
            _ if self.at_ident() => Some(self.parse_ident()?.to_ascii_lowercase()),
            _ => return self.err("expected type selector after '|'"),
        };
        Ok(())
    }

    fn parse_attr(&mut self) -> ParseResult<AttrSelector> {
        self.skip_ws();
        let start = self.pos;
        let head = match self.peek() {
            Some('*') => {
                self.bump();
                Some(None)
            }
            _ if self.at_ident() => Some(Some(self.parse_ident()?)),
            _ => None,
        };

        let name = if self.peek() == Some('|') && self.peek_second() != Some('=') {
            self.bump();
            if let Some(Some(prefix)) = head {
                return self.err_at(start, format!("undeclared namespace prefix '{prefix}'"));
            }
            self.parse_ident()?
        } else {
            match head {
                Some(Some(name)) => name,
                _ => return self.err_at(start, "expected attribute name"),
            }
        };
        let name = name.to_ascii_lowercase();
        self.skip_ws();

        let operator = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttrSelector {
                    name,
                    operator: AttrOperator::Exists,
                    value: String::new(),
                    case_insensitive: false,
                });
            }
            Some('=') => {
                self.bump();
                AttrOperator::Equals
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) if self.peek_second() == Some('=') => {
                self.pos += 2;
                match c {
                    '~' => AttrOperator::Includes,
                    '|' => AttrOperator::DashMatch,
                    '^' => AttrOperator::Prefix,
                    '$' => AttrOperator::Suffix,
                    _ => AttrOperator::Substring,
                }
            }
            None => return self.err("unterminated attribute selector"),
            Some(c) => return self.err(format!("unexpected '{c}' in attribute selector")),
        };

        self.skip_ws();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => self.parse_quoted(q)?,
            _ => self.parse_ident()?,
        };
        self.skip_ws();

        let mut case_insensitive = false;
        if self.at_ident() {
            let flag_at = self.pos;
            match self.parse_ident()?.to_ascii_lowercase().as_str() {
                "i" => case_insensitive = true,
                "s" => {}
                other => return self.err_at(flag_at, format!("unknown attribute flag '{other}'")),
            }
            self.skip_ws();
        }

        match self.bump() {
            Some(']') => Ok(AttrSelector { name, operator, value, case_insensitive }),
            _ => self.err("unterminated attribute selector"),
        }
    }

    /// `:name`, `:name(...)` or `::name`, starting at the first colon
    fn parse_pseudo(&mut self, compound: &mut Compound, nested: bool) -> ParseResult<()> {
        let start = self.pos;
        self.bump();
        let double = self.peek() == Some(':');
        if double {
            self.bump();
        }
        let name = self.parse_ident()?.to_ascii_lowercase();

        let is_element = if double {
            PSEUDO_ELEMENTS.contains(&name.as_str()) || name.starts_with('-')
        } else {
            LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str())
        };
        if is_element {
            if nested {
                return self.err_at(start, "pseudo-element not allowed here");
            }
            compound.pseudo_element = Some(name);
            return Ok(());
        }
        if double {
            return self.err_at(start, format!("unknown pseudo-element '::{name}'"));
        }

        if self.peek() != Some('(') {
            let Some(pseudo) = PseudoClass::from_name(&name) else {
                return self.err_at(start, format!("unknown pseudo-class ':{name}'"));
            };
            compound.pseudo_classes.push(pseudo);
            return Ok(());
        }

        self.bump();
        let pseudo = match name.as_str() {
            "not" => PseudoClass::Not(self.parse_list(true)?),
            "is" | "where" => PseudoClass::Is(self.parse_list(true)?),
            "has" => PseudoClass::Has(self.parse_relative_list()?),
            "nth-child" => PseudoClass::NthChild(self.parse_nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth()?),
            "lang" => {
                self.skip_ws();
                let range = match self.peek() {
                    Some(q @ ('"' | '\'')) => self.parse_quoted(q)?,
                    _ => self.parse_ident()?,
                };
                PseudoClass::Lang(range)
            }
            _ => return self.err_at(start, format!("unknown pseudo-class ':{name}()'")),
        };
        self.skip_ws();
        self.expect(')')?;
        compound.pseudo_classes.push(pseudo);
        Ok(())
    }

    fn parse_nth(&mut self) -> ParseResult<Nth> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ')') {
            self.bump();
        }
        match Nth::parse(&self.input[start..self.pos]) {
            Some(nth) => Ok(nth),
            None => self.err_at(start, "invalid An+B expression"),
        }
    }

    fn parse_relative_list(&mut self) -> ParseResult<Vec<RelativeSelector>> {
        let mut relative = Vec::new();
        loop {
            self.skip_ws();
            let combinator = match self.peek().and_then(Combinator::from_char) {
                Some(combinator) => {
                    self.bump();
                    self.skip_ws();
                    combinator
                }
                None => Combinator::Descendant,
            };
            let selector = self.parse_complex(true)?;
            relative.push(RelativeSelector { combinator, selector });
            self.skip_ws();
            if self.peek() != Some(',') {
                break;
            }
            self.bump();
        }
        Ok(relative)
    }

    fn at_ident(&self) -> bool {
        let mut chars = self.input[self.pos..].chars();
        match chars.next() {
            Some('-') => chars.next().is_some_and(|c| is_name_start(c) || c == '-' || c == '\\'),
            Some('\\') => chars.next().is_some_and(|c| c != '\n'),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    fn parse_ident(&mut self) -> ParseResult<String> {
        if !self.at_ident() {
            return self.err("expected identifier");
        }
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                ident.push(self.parse_escape()?);
            } else if is_name_char(c) {
                self.bump();
                ident.push(c);
            } else {
                break;
            }
        }
        Ok(ident)
    }

    /// Escape body after the backslash
    fn parse_escape(&mut self) -> ParseResult<char> {
        let start = self.pos;
        let hex_len = self.input[start..]
            .chars()
            .take(6)
            .take_while(char::is_ascii_hexdigit)
            .count();
        if hex_len > 0 {
            let code = u32::from_str_radix(&self.input[start..start + hex_len], 16).unwrap_or(0);
            self.pos += hex_len;
            if self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
                self.bump();
            }
            return Ok(match code {
                0 => char::REPLACEMENT_CHARACTER,
                _ => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
            });
        }
        match self.bump() {
            None | Some('\n') => self.err_at(start, "invalid escape"),
            Some(c) => Ok(c),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> ParseResult<String> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return self.err_at(start, "unterminated string"),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.peek() {
                    Some('\n') => {
                        self.bump();
                    }
                    None => {}
                    Some(_) => value.push(self.parse_escape()?),
                },
                Some(c) => value.push(c),
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
