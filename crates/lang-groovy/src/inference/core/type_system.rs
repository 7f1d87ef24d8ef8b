//! Core trait definitions for the type system abstraction.
//!
//! These traits abstract away where declarations come from, so the engine
//! works the same against the built-in JDK registry, published source units
//! or mock implementations.

use super::types::{MemberInfo, ParameterInfo, TypeInfo};
use groovyscope_api::TypeRef;
use std::collections::{HashSet, VecDeque};

/// Provides type information by binary name.
pub trait TypeProvider: Send + Sync {
    /// Returns `None` if the type is not known.
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo>;

    fn has_type(&self, fqn: &str) -> bool {
        self.get_type_info(fqn).is_some()
    }
}

/// Provides the supertype edges of a type, with their type arguments.
pub trait InheritanceProvider: Send + Sync {
    /// The direct superclass edge, e.g. `java.util.AbstractMap<K,V>`.
    ///
    /// Returns `None` for `java.lang.Object` and interfaces.
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef>;

    /// The directly implemented (or extended, for interfaces) interface edges.
    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef>;

    /// Walk all ancestors in BFS order, superclass before interfaces.
    ///
    /// Cyclic declarations are cut by a visited set.
    fn walk_ancestors(&self, fqn: &str) -> Box<dyn Iterator<Item = String> + '_> {
        let mut visited = HashSet::new();
        visited.insert(fqn.to_string());
        let mut queue = VecDeque::from([fqn.to_string()]);
        let mut order = Vec::new();

        while let Some(current) = queue.pop_front() {
            let parents = self
                .get_superclass(&current)
                .into_iter()
                .chain(self.get_interfaces(&current));
            for parent in parents {
                if visited.insert(parent.name.clone()) {
                    order.push(parent.name.clone());
                    queue.push_back(parent.name);
                }
            }
        }

        Box::new(order.into_iter())
    }
}

/// Provides member lookup within a single type (not walking inheritance).
pub trait MemberProvider: Send + Sync {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo>;

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo>;
}

/// The combined type system interface consumed by the lookup chain.
pub trait GroovyTypeSystem: TypeProvider + InheritanceProvider + MemberProvider {
    /// Members named `member_name` from the most derived type declaring one.
    ///
    /// Searches the type itself, then its ancestors, then `java.lang.Object`
    /// (which interfaces do not list as a supertype).
    fn find_member_in_hierarchy(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        let mut members = self.get_members(type_fqn, member_name);
        if !members.is_empty() {
            return members;
        }

        for ancestor in self.walk_ancestors(type_fqn) {
            members = self.get_members(&ancestor, member_name);
            if !members.is_empty() {
                return members;
            }
        }

        if type_fqn != groovyscope_api::OBJECT {
            return self.get_members(groovyscope_api::OBJECT, member_name);
        }
        vec![]
    }

    /// Every member named `member_name` anywhere in the hierarchy, most derived first.
    fn find_all_in_hierarchy(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        let mut members = self.get_members(type_fqn, member_name);
        for ancestor in self.walk_ancestors(type_fqn) {
            members.extend(self.get_members(&ancestor, member_name));
        }
        if type_fqn != groovyscope_api::OBJECT {
            members.extend(self.get_members(groovyscope_api::OBJECT, member_name));
        }
        members
    }

    /// Pick the best overload for the argument types.
    ///
    /// Phases follow Java overload resolution (exact, subtype, varargs exact,
    /// varargs subtype). Groovy dispatches dynamically, so when no phase
    /// matches the first candidate with a matching arity is used, then the
    /// first candidate at all.
    fn resolve_method(&self, candidates: &[MemberInfo], arg_types: &[TypeRef]) -> Option<MemberInfo> {
        if candidates.is_empty() {
            return None;
        }

        let exact_fixed = collect_matching_candidates(candidates, |member, params| {
            matches_fixed_arity(params, arg_types, |arg, expected| {
                is_type_variable_of(member, expected) || arg == expected
            })
        });
        if !exact_fixed.is_empty() {
            return select_most_specific(self, exact_fixed, arg_types);
        }

        let subtype_fixed = collect_matching_candidates(candidates, |member, params| {
            matches_fixed_arity(params, arg_types, |arg, expected| {
                is_type_variable_of(member, expected) || self.is_subtype(arg, expected)
            })
        });
        if !subtype_fixed.is_empty() {
            return select_most_specific(self, subtype_fixed, arg_types);
        }

        let exact_varargs = collect_matching_candidates(candidates, |member, params| {
            matches_varargs_arity(params, arg_types, |arg, expected| {
                is_type_variable_of(member, expected) || arg == expected
            })
        });
        if !exact_varargs.is_empty() {
            return select_most_specific(self, exact_varargs, arg_types);
        }

        let subtype_varargs = collect_matching_candidates(candidates, |member, params| {
            matches_varargs_arity(params, arg_types, |arg, expected| {
                is_type_variable_of(member, expected) || self.is_subtype(arg, expected)
            })
        });
        if !subtype_varargs.is_empty() {
            return select_most_specific(self, subtype_varargs, arg_types);
        }

        candidates
            .iter()
            .find(|c| c.arity() == arg_types.len())
            .or_else(|| candidates.first())
            .cloned()
    }

    /// Delegates to [`super::subtyping::is_subtype`].
    fn is_subtype(&self, sub: &TypeRef, super_type: &TypeRef) -> bool {
        super::subtyping::is_subtype(sub, super_type, self)
    }
}

// Blanket implementation: any type implementing all three traits is a GroovyTypeSystem
impl<T: TypeProvider + InheritanceProvider + MemberProvider + ?Sized> GroovyTypeSystem for T {}

/// A method type variable (`T` in `<T> T m(Class<T>)`) accepts any argument.
fn is_type_variable_of(member: &MemberInfo, ty: &TypeRef) -> bool {
    ty.args.is_empty() && member.is_method_type_parameter(&ty.name)
}

fn matches_fixed_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], mut matches: F) -> bool
where
    F: FnMut(&TypeRef, &TypeRef) -> bool,
{
    if params.len() != arg_types.len() {
        return false;
    }

    params
        .iter()
        .zip(arg_types.iter())
        .all(|(p, a)| matches(a, &p.type_ref))
}

fn matches_varargs_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], mut matches: F) -> bool
where
    F: FnMut(&TypeRef, &TypeRef) -> bool,
{
    let Some(last_param) = params.last() else {
        return false;
    };
    if !last_param.is_varargs {
        return false;
    }
    let Some(element) = last_param.type_ref.component() else {
        return false;
    };

    let fixed_count = params.len() - 1;
    if arg_types.len() < fixed_count {
        return false;
    }

    if !params[..fixed_count]
        .iter()
        .zip(arg_types[..fixed_count].iter())
        .all(|(p, a)| matches(a, &p.type_ref))
    {
        return false;
    }

    if arg_types.len() == fixed_count {
        return true;
    }

    // Direct array pass-through: foo(String[]) called with one String[] argument.
    if arg_types.len() == params.len() && matches(&arg_types[fixed_count], &last_param.type_ref) {
        return true;
    }

    arg_types[fixed_count..].iter().all(|a| matches(a, &element))
}

fn collect_matching_candidates<F>(candidates: &[MemberInfo], mut matches: F) -> Vec<MemberInfo>
where
    F: FnMut(&MemberInfo, &[ParameterInfo]) -> bool,
{
    candidates
        .iter()
        .filter(|cand| {
            cand.parameters
                .as_deref()
                .map(|params| matches(cand, params))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn select_most_specific<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    candidates: Vec<MemberInfo>,
    arg_types: &[TypeRef],
) -> Option<MemberInfo> {
    if candidates.len() <= 1 {
        return candidates.into_iter().next();
    }

    let mut best_idx = 0usize;
    let mut best_score = i32::MIN;

    for (i, cand) in candidates.iter().enumerate() {
        let mut score = 0i32;
        for (j, other) in candidates.iter().enumerate() {
            if i == j {
                continue;
            }
            let cand_more_specific = is_more_specific_than(ts, cand, other, arg_types.len());
            let other_more_specific = is_more_specific_than(ts, other, cand, arg_types.len());
            if cand_more_specific && !other_more_specific {
                score += 1;
            } else if other_more_specific && !cand_more_specific {
                score -= 1;
            }
        }

        if score > best_score {
            best_score = score;
            best_idx = i;
        }
    }

    candidates.into_iter().nth(best_idx)
}

fn is_more_specific_than<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    left: &MemberInfo,
    right: &MemberInfo,
    arg_count: usize,
) -> bool {
    let (Some(left_types), Some(right_types)) = (
        effective_param_types(left, arg_count),
        effective_param_types(right, arg_count),
    ) else {
        return false;
    };
    if left_types.len() != right_types.len() {
        return false;
    }

    let mut strict = false;
    for (l, r) in left_types.iter().zip(right_types.iter()) {
        if l == r {
            continue;
        }
        if ts.is_subtype(l, r) {
            strict = true;
        } else {
            return false;
        }
    }
    strict
}

fn effective_param_types(member: &MemberInfo, arg_count: usize) -> Option<Vec<TypeRef>> {
    let params = member.parameters.as_ref()?;
    let Some(last) = params.last() else {
        return Some(vec![]);
    };

    if !last.is_varargs {
        if params.len() == arg_count {
            return Some(params.iter().map(|p| p.type_ref.clone()).collect());
        }
        return None;
    }

    let element = last.type_ref.component()?;
    let fixed_count = params.len() - 1;
    if arg_count < fixed_count {
        return None;
    }

    let mut types: Vec<TypeRef> = params[..fixed_count]
        .iter()
        .map(|p| p.type_ref.clone())
        .collect();
    types.extend(std::iter::repeat_n(element, arg_count - fixed_count));
    Some(types)
}
