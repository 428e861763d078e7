use tracing::trace;

use crate::keywords::{KeywordSpec, Role, RoleMap};
use crate::template::Node;

/// One translatable call found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
    /// Line of the call (1-indexed).
    pub line: usize,
}

/// Match a call node against the keyword table.
///
/// Returns `None` for anything that is not a call to a tracked keyword, and
/// for tracked calls whose msgid argument is missing, empty or not a string
/// literal. Only string literals are read; variables and expressions at a
/// role position are ignored.
pub fn match_call(node: &Node, spec: &KeywordSpec) -> Option<ExtractedMessage> {
    let name = node.callee_name()?;
    let roles = spec.get(name)?;
    let args = node.arguments()?;

    let Some(msgid) = literal_at(args, roles, Role::Msgid).filter(|s| !s.is_empty()) else {
        trace!(keyword = name, line = node.line, "call without a literal msgid");
        return None;
    };

    Some(ExtractedMessage {
        msgid: msgid.to_string(),
        msgid_plural: literal_at(args, roles, Role::MsgidPlural).map(String::from),
        msgctxt: literal_at(args, roles, Role::Msgctxt)
            .filter(|s| !s.is_empty())
            .map(String::from),
        line: node.line,
    })
}

fn literal_at<'a>(args: &'a [Node], roles: &RoleMap, role: Role) -> Option<&'a str> {
    args.get(roles.get(role)?)?.as_str_literal()
}
