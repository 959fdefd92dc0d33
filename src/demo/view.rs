//! A minimal view tree for the demo pages.
//!
//! Views here are data. The demo binary logs their text rendering; tests
//! inspect them directly.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewNode {
    Text(String),
    Alert(String),
    Input {
        label: String,
        value: String,
        errors: Vec<String>,
        disabled: bool,
    },
    Button {
        label: String,
        busy: bool,
        disabled: bool,
    },
    Section {
        title: String,
        children: Vec<ViewNode>,
    },
}

impl ViewNode {
    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text(text.into())
    }

    pub fn button(label: impl Into<String>, busy: bool) -> Self {
        ViewNode::Button {
            label: label.into(),
            busy,
            disabled: busy,
        }
    }

    pub fn section(title: impl Into<String>, children: Vec<ViewNode>) -> Self {
        ViewNode::Section {
            title: title.into(),
            children,
        }
    }

    /// Depth-first search for a button by label.
    pub fn find_button(&self, wanted: &str) -> Option<&ViewNode> {
        match self {
            ViewNode::Button { label, .. } if label == wanted => Some(self),
            ViewNode::Section { children, .. } => {
                children.iter().find_map(|child| child.find_button(wanted))
            }
            _ => None,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            ViewNode::Text(text) => writeln!(f, "{}{}", pad, text),
            ViewNode::Alert(text) => writeln!(f, "{}! {}", pad, text),
            ViewNode::Input {
                label,
                value,
                errors,
                disabled,
            } => {
                let lock = if *disabled { " (disabled)" } else { "" };
                writeln!(f, "{}{}: [{}]{}", pad, label, value, lock)?;
                for error in errors {
                    writeln!(f, "{}  ! {}", pad, error)?;
                }
                Ok(())
            }
            ViewNode::Button { label, busy, .. } => {
                let spinner = if *busy { " ..." } else { "" };
                writeln!(f, "{}<{}{}>", pad, label, spinner)
            }
            ViewNode::Section { title, children } => {
                writeln!(f, "{}# {}", pad, title)?;
                for child in children {
                    child.write_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
