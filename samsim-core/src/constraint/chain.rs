//! Short-circuiting evaluation of a constraint list.

use super::{Constraint, ConstraintResult};
use crate::context::ConstraintContext;

/// Evaluates constraints in declaration order and stops at the first
/// failure, so cheap predicates placed early guard expensive ones (map
/// searches) placed late.
pub struct ConstraintChain;

impl ConstraintChain {
    pub fn test_all(constraints: &[Constraint], ctx: &ConstraintContext) -> ConstraintResult {
        for constraint in constraints {
            if let ConstraintResult::Fail(reason) = constraint.test(ctx) {
                log::trace!(
                    "constraint '{}' rejected {}: {}",
                    constraint.name(),
                    ctx.actor.name,
                    reason
                );
                return ConstraintResult::Fail(reason);
            }
        }
        ConstraintResult::Pass
    }
}
