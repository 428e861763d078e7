use tracing::debug;

use super::matcher::match_call;
use crate::catalog::Catalog;
use crate::error::ExtractError;
use crate::keywords::KeywordSpec;
use crate::template::{Node, NodeKind};
use crate::template::nodes::SetValue;

/// Visit every node under `node` in source order, merging each matched call
/// into `catalog`.
///
/// Call arguments are always visited, matched or not, so a translatable call
/// nested inside another call's arguments is found too. The first plural
/// conflict stops the walk.
pub fn walk(node: &Node, spec: &KeywordSpec, catalog: &mut Catalog) -> Result<(), ExtractError> {
    match &node.kind {
        NodeKind::Data(_) | NodeKind::Literal(_) | NodeKind::Symbol(_) => Ok(()),
        NodeKind::Root(children) | NodeKind::Array(children) => walk_all(children, spec, catalog),
        NodeKind::Output(inner) | NodeKind::Group(inner) => walk(inner, spec, catalog),
        NodeKind::Dict(pairs) => {
            for pair in pairs {
                walk(&pair.key, spec, catalog)?;
                walk(&pair.value, spec, catalog)?;
            }
            Ok(())
        }
        NodeKind::KeywordArgs(kwargs) => {
            for kwarg in kwargs {
                walk(&kwarg.value, spec, catalog)?;
            }
            Ok(())
        }
        NodeKind::Call { callee, args } => {
            if let Some(message) = match_call(node, spec) {
                debug!(msgid = %message.msgid, line = message.line, "extracted message");
                catalog.merge(message)?;
            }
            walk(callee, spec, catalog)?;
            walk_all(args, spec, catalog)
        }
        NodeKind::Filter { target, args, .. } => {
            walk(target, spec, catalog)?;
            walk_all(args, spec, catalog)
        }
        NodeKind::LookupVal { target, key } => {
            walk(target, spec, catalog)?;
            walk(key, spec, catalog)
        }
        NodeKind::InlineIf {
            cond,
            body,
            otherwise,
        } => {
            walk(body, spec, catalog)?;
            walk(cond, spec, catalog)?;
            match otherwise {
                Some(otherwise) => walk(otherwise, spec, catalog),
                None => Ok(()),
            }
        }
        NodeKind::Unary { operand, .. } => walk(operand, spec, catalog),
        NodeKind::Binary { left, right, .. } => {
            walk(left, spec, catalog)?;
            walk(right, spec, catalog)
        }
        NodeKind::If {
            cond,
            body,
            otherwise,
        } => {
            walk(cond, spec, catalog)?;
            walk_all(body, spec, catalog)?;
            walk_all(otherwise, spec, catalog)
        }
        NodeKind::Switch {
            expr,
            cases,
            default,
        } => {
            walk(expr, spec, catalog)?;
            for case in cases {
                walk(&case.cond, spec, catalog)?;
                walk_all(&case.body, spec, catalog)?;
            }
            walk_all(default, spec, catalog)
        }
        NodeKind::Loop {
            targets,
            iterable,
            body,
            otherwise,
            ..
        } => {
            walk_all(targets, spec, catalog)?;
            walk(iterable, spec, catalog)?;
            walk_all(body, spec, catalog)?;
            walk_all(otherwise, spec, catalog)
        }
        NodeKind::Block { body, .. } => walk_all(body, spec, catalog),
        NodeKind::Macro { params, body, .. } => {
            walk_all(params, spec, catalog)?;
            walk_all(body, spec, catalog)
        }
        NodeKind::CallBlock { params, call, body } => {
            walk_all(params, spec, catalog)?;
            walk(call, spec, catalog)?;
            walk_all(body, spec, catalog)
        }
        NodeKind::Set { targets, value } => {
            walk_all(targets, spec, catalog)?;
            match value {
                SetValue::Expr(expr) => walk(expr, spec, catalog),
                SetValue::Body(body) => walk_all(body, spec, catalog),
            }
        }
        NodeKind::Include { template, .. }
        | NodeKind::Import { template, .. }
        | NodeKind::FromImport { template, .. }
        | NodeKind::Extends { template } => walk(template, spec, catalog),
        NodeKind::FilterBlock { args, body, .. } => {
            walk_all(args, spec, catalog)?;
            walk_all(body, spec, catalog)
        }
    }
}

fn walk_all(nodes: &[Node], spec: &KeywordSpec, catalog: &mut Catalog) -> Result<(), ExtractError> {
    nodes.iter().try_for_each(|node| walk(node, spec, catalog))
}
