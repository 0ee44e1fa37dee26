//! Parsed XML documentation comments, keyed by member name.

use std::collections::HashMap;
use std::fmt;

use crate::error::ExtractError;

/// Kind of a documented member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A type (`T:` key).
    Type,
    /// A property (`P:` key).
    Property,
    /// A method.
    Method,
    /// A field.
    Field,
    /// An event.
    Event,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Property => "property",
            Self::Method => "method",
            Self::Field => "field",
            Self::Event => "event",
        })
    }
}

/// A member whose documentation is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRef<'a> {
    kind: MemberKind,
    type_name: &'a str,
    member: Option<&'a str>,
}

impl<'a> MemberRef<'a> {
    /// References a type by its full name.
    #[must_use]
    pub const fn of_type(type_name: &'a str) -> Self {
        Self {
            kind: MemberKind::Type,
            type_name,
            member: None,
        }
    }

    /// References a property declared on `type_name`.
    #[must_use]
    pub const fn of_property(type_name: &'a str, property: &'a str) -> Self {
        Self {
            kind: MemberKind::Property,
            type_name,
            member: Some(property),
        }
    }

    /// References any other member kind declared on `type_name`.
    #[must_use]
    pub const fn of_kind(kind: MemberKind, type_name: &'a str, member: &'a str) -> Self {
        Self {
            kind,
            type_name,
            member: Some(member),
        }
    }

    /// Returns the documentation key: `T:Type` or `P:Type.Property`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnresolvedMember`] for any other member kind.
    pub fn doc_key(&self) -> Result<String, ExtractError> {
        match self.kind {
            MemberKind::Type => Ok(format!("T:{}", self.type_name)),
            MemberKind::Property => Ok(format!(
                "P:{}.{}",
                self.type_name,
                self.member.unwrap_or_default()
            )),
            kind @ (MemberKind::Method | MemberKind::Field | MemberKind::Event) => {
                Err(ExtractError::UnresolvedMember {
                    member: self.display_name(),
                    kind,
                })
            }
        }
    }

    fn display_name(&self) -> String {
        match self.member {
            Some(member) => format!("{}.{member}", self.type_name),
            None => self.type_name.to_owned(),
        }
    }
}

/// Summary and remarks for one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDoc {
    /// Trimmed `<summary>` text.
    pub summary: Option<String>,
    /// Trimmed `<remarks>` text.
    pub remarks: Option<String>,
}

/// XML documentation for one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlDoc {
    members: HashMap<String, MemberDoc>,
}

impl XmlDoc {
    /// Parses a `<doc><members><member name="...">` document.
    ///
    /// Members with a blank name are ignored; the first entry wins when a
    /// name repeats.
    ///
    /// # Errors
    ///
    /// Returns the parser error when `xml` is not well-formed.
    pub fn parse(xml: &str) -> Result<Self, roxmltree::Error> {
        let document = roxmltree::Document::parse(xml)?;
        let mut members = HashMap::new();
        let root = document.root_element();
        if !root.has_tag_name("doc") {
            return Ok(Self { members });
        }
        let member_nodes = root
            .children()
            .filter(|node| node.has_tag_name("members"))
            .flat_map(|node| node.children())
            .filter(|node| node.has_tag_name("member"));
        for node in member_nodes {
            let Some(name) = node.attribute("name").filter(|name| !name.trim().is_empty()) else {
                continue;
            };
            members.entry(name.to_owned()).or_insert_with(|| MemberDoc {
                summary: child_text(node, "summary"),
                remarks: child_text(node, "remarks"),
            });
        }
        Ok(Self { members })
    }

    /// Returns the number of documented members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Reports whether no members were documented.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the documentation for `member`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnresolvedMember`] for member kinds without a
    /// documentation key.
    pub fn member(&self, member: &MemberRef<'_>) -> Result<Option<&MemberDoc>, ExtractError> {
        let key = member.doc_key()?;
        Ok(self.members.get(&key))
    }

    /// Returns the member's summary, if any.
    ///
    /// # Errors
    ///
    /// See [`XmlDoc::member`].
    pub fn summary(&self, member: &MemberRef<'_>) -> Result<Option<String>, ExtractError> {
        Ok(self
            .member(member)?
            .and_then(|doc| doc.summary.clone()))
    }

    /// Returns the member's remarks, if any.
    ///
    /// # Errors
    ///
    /// See [`XmlDoc::member`].
    pub fn remarks(&self, member: &MemberRef<'_>) -> Result<Option<String>, ExtractError> {
        Ok(self
            .member(member)?
            .and_then(|doc| doc.remarks.clone()))
    }
}

fn child_text(node: roxmltree::Node<'_, '_>, tag: &str) -> Option<String> {
    let child = node.children().find(|child| child.has_tag_name(tag))?;
    let text: String = child
        .descendants()
        .filter(roxmltree::Node::is_text)
        .filter_map(|text_node| text_node.text())
        .collect();
    Some(text.trim().to_owned())
}
