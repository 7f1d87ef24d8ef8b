//! The ordered lookup chain.
//!
//! Strategies are grouped in tiers. Tiers are asked in order and the first
//! tier producing a confident answer wins; inside a tier every strategy is
//! asked and the candidates are ranked:
//!
//! 1. a member declared on a more derived type beats one from a supertype,
//! 2. otherwise `Exact` beats `Inferred`,
//! 3. otherwise the strategy registered first wins.
//!
//! When nobody is confident the chain still returns `Unknown`, carrying the
//! first fallback type any strategy offered.

use crate::ast::ExprId;
use crate::inference::context::LookupContext;
use crate::inference::lookup::{
    DgmLookup, DuckTypeLookup, LiteralLookup, LookupResult, MemberLookup, OperatorLookup, Receiver,
    StcTypeLookup, TypeLookup, TypeNameLookup, VariableLookup,
};
use crate::inference::GroovyTypeSystem;
use std::cmp::Ordering;
use tracing::{debug, trace};

pub struct LookupTier {
    pub name: &'static str,
    pub strategies: Vec<Box<dyn TypeLookup>>,
}

impl LookupTier {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            strategies: Vec::new(),
        }
    }

    pub fn with(mut self, strategy: impl TypeLookup + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }
}

pub struct LookupChain {
    tiers: Vec<LookupTier>,
}

impl Default for LookupChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl LookupChain {
    pub fn new(tiers: Vec<LookupTier>) -> Self {
        Self { tiers }
    }

    /// The tiers used for every unit.
    pub fn standard() -> Self {
        Self::new(vec![
            LookupTier::new("stc").with(StcTypeLookup),
            LookupTier::new("local")
                .with(VariableLookup)
                .with(LiteralLookup)
                .with(OperatorLookup),
            LookupTier::new("member").with(MemberLookup).with(DgmLookup),
            LookupTier::new("type").with(TypeNameLookup),
            LookupTier::new("duck").with(DuckTypeLookup),
        ])
    }

    pub fn tiers(&self) -> &[LookupTier] {
        &self.tiers
    }

    pub fn lookup(&self, expr: ExprId, receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        let mut fallback: Option<LookupResult> = None;

        for tier in &self.tiers {
            let mut best: Option<(LookupResult, &'static str)> = None;
            for strategy in &tier.strategies {
                let result = strategy.lookup(expr, receiver, ctx);
                trace!(
                    "{} on expression {}: {:?} {:?}",
                    strategy.name(),
                    expr.0,
                    result.confidence,
                    result.type_ref.as_ref().map(ToString::to_string)
                );
                if !result.is_confident() {
                    if fallback.is_none() && result.type_ref.is_some() {
                        fallback = Some(result);
                    }
                    continue;
                }
                best = match best {
                    Some((current, owner)) if !beats(ctx.ts, &result, &current) => Some((current, owner)),
                    _ => Some((result, strategy.name())),
                };
            }

            if let Some((result, owner)) = best {
                debug!(
                    "expression {} typed by {} in tier {}: {}",
                    expr.0,
                    owner,
                    tier.name,
                    result.type_ref.as_ref().map(ToString::to_string).unwrap_or_default()
                );
                return result;
            }
        }

        fallback.unwrap_or_else(LookupResult::unknown)
    }
}

/// Whether `candidate` outranks `current` inside one tier.
fn beats(ts: &dyn GroovyTypeSystem, candidate: &LookupResult, current: &LookupResult) -> bool {
    match derivation_order(ts, candidate, current) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => candidate.confidence > current.confidence,
    }
}

/// `Less` when the candidate's declaring type strictly derives from the current one's.
fn derivation_order(ts: &dyn GroovyTypeSystem, candidate: &LookupResult, current: &LookupResult) -> Ordering {
    let (Some(a), Some(b)) = (&candidate.declaring_type, &current.declaring_type) else {
        return Ordering::Equal;
    };
    let (a, b) = (a.erasure(), b.erasure());
    if a == b {
        Ordering::Equal
    } else if ts.is_subtype(&a, &b) {
        Ordering::Less
    } else if ts.is_subtype(&b, &a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Module;
    use crate::config::GroovyVersion;
    use crate::inference::adapters::jdk::jdk_registry;
    use crate::inference::attributes::NodeAttributes;
    use crate::inference::core::imports::ImportScope;
    use crate::inference::dgm::DgmTable;
    use crate::inference::scope::ScopeStack;
    use crate::parser::parse_module;
    use groovyscope_api::{Confidence, TypeRef};
    use std::collections::HashMap;

    struct Fixed {
        name: &'static str,
        result: LookupResult,
    }

    impl TypeLookup for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn lookup(&self, _: ExprId, _: Option<&Receiver>, _: &LookupContext<'_>) -> LookupResult {
            self.result.clone()
        }
    }

    fn fixed(name: &'static str, result: LookupResult) -> Fixed {
        Fixed { name, result }
    }

    fn declared_on(ty: &str, owner: &str, confidence: Confidence) -> LookupResult {
        LookupResult::inferred(TypeRef::new(ty))
            .with_confidence(confidence)
            .with_declaring_type(TypeRef::new(owner))
    }

    fn run(chain: &LookupChain) -> LookupResult {
        let module: Module = parse_module("x", "Test");
        let imports = ImportScope::for_module(&module, &[]);
        let scope = ScopeStack::new();
        let attributes = NodeAttributes::default();
        let resolved = HashMap::new();
        let ctx = LookupContext {
            ts: jdk_registry(),
            module: &module,
            imports: &imports,
            scope: &scope,
            attributes: &attributes,
            dgm: DgmTable::for_version(GroovyVersion::V2_4),
            version: GroovyVersion::V2_4,
            resolved: &resolved,
        };
        chain.lookup(ExprId(0), None, &ctx)
    }

    #[test]
    fn earlier_tiers_win_when_confident() {
        let chain = LookupChain::new(vec![
            LookupTier::new("first").with(fixed("a", LookupResult::fallback(TypeRef::new("A")))),
            LookupTier::new("second").with(fixed("b", LookupResult::inferred(TypeRef::new("B")))),
            LookupTier::new("third").with(fixed("c", LookupResult::exact(TypeRef::new("C")))),
        ]);
        assert_eq!(run(&chain).type_ref, Some(TypeRef::new("B")));
    }

    #[test]
    fn derived_declarations_beat_confidence() {
        let chain = LookupChain::new(vec![LookupTier::new("member")
            .with(fixed(
                "base",
                declared_on("java.lang.Object", "java.util.AbstractList", Confidence::Exact),
            ))
            .with(fixed(
                "derived",
                declared_on("java.lang.String", "java.util.ArrayList", Confidence::Inferred),
            ))]);
        assert_eq!(run(&chain).type_ref, Some(TypeRef::new("java.lang.String")));
    }

    #[test]
    fn unrelated_declarations_fall_back_to_confidence_then_order() {
        let chain = LookupChain::new(vec![LookupTier::new("member")
            .with(fixed("first", declared_on("A", "java.util.Date", Confidence::Inferred)))
            .with(fixed("second", declared_on("B", "java.io.File", Confidence::Exact)))
            .with(fixed("third", declared_on("C", "java.io.File", Confidence::Exact)))]);
        assert_eq!(run(&chain).type_ref, Some(TypeRef::new("B")));
    }

    #[test]
    fn unknown_everywhere_keeps_the_first_fallback() {
        let chain = LookupChain::new(vec![
            LookupTier::new("first").with(fixed("a", LookupResult::unknown())),
            LookupTier::new("second")
                .with(fixed("b", LookupResult::fallback(TypeRef::object())))
                .with(fixed("c", LookupResult::fallback(TypeRef::new("C")))),
        ]);
        let result = run(&chain);
        assert_eq!(result.confidence, Confidence::Unknown);
        assert_eq!(result.type_ref, Some(TypeRef::object()));
    }
}
