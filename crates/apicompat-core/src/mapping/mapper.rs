use std::collections::{BTreeMap, BTreeSet};

use super::node::{Correspondence, MappingNode};
use crate::comparer::{ElementComparer, ElementIdentity, Side};
use crate::filter::SurfaceFilter;
use crate::model::{AssemblyDef, Element, TypeDef, TypeForwarderDef};

/// Longest forwarder chain followed before a forwarder counts as unresolved
pub const MAX_FORWARDER_HOPS: usize = 8;

/// Types of one namespace as seen through the comparer
#[derive(Default)]
struct NamespaceGroup<'a> {
    /// Smallest declared namespace name folded into this group
    declared: Option<&'a str>,
    types: Vec<&'a TypeDef>,
}

/// Reachable types of one assembly, keyed by canonical namespace
type SurfaceView<'a> = BTreeMap<String, NamespaceGroup<'a>>;

/// Namespace part of a canonical type name: everything before the last `.`
/// of the outermost type.
fn namespace_of(full_name: &str) -> &str {
    let outer = full_name.split('+').next().unwrap_or(full_name);
    outer.rfind('.').map(|idx| &full_name[..idx]).unwrap_or("")
}

/// Build the mapping forest for two assembly sets.
///
/// Assemblies pair by name. Types are grouped into namespaces by their
/// canonical full name, so a remap that moves a type to another namespace
/// also moves it to that namespace's node. Types and members pair by the
/// comparer's identity. Only elements the filter considers reachable take
/// part. Children of every node are ordered by canonical identity, so the
/// result does not depend on the order of the inputs.
pub fn build_mapping<'a>(
    contract: &[&'a AssemblyDef],
    implementation: &[&'a AssemblyDef],
    comparer: &dyn ElementComparer,
    filter: &dyn SurfaceFilter,
) -> Vec<MappingNode<'a>> {
    let mapper = Mapper {
        comparer,
        filter,
        contract,
        implementation,
    };

    let pairs = mapper.pair(
        contract.iter().copied().map(Element::Assembly).collect(),
        implementation.iter().copied().map(Element::Assembly).collect(),
    );

    pairs
        .into_iter()
        .filter_map(|(c, i)| {
            let correspondence = Correspondence::from_sides(c, i)?;
            let c_view = mapper.view(c.and_then(|el| el.as_assembly()), Side::Contract);
            let i_view = mapper.view(i.and_then(|el| el.as_assembly()), Side::Implementation);
            Some(MappingNode::new(correspondence, mapper.namespaces(&c_view, &i_view)))
        })
        .collect()
}

struct Mapper<'m, 'a> {
    comparer: &'m dyn ElementComparer,
    filter: &'m dyn SurfaceFilter,
    contract: &'m [&'a AssemblyDef],
    implementation: &'m [&'a AssemblyDef],
}

impl<'m, 'a> Mapper<'m, 'a> {
    /// Namespace nodes of one assembly pair, paired by canonical namespace
    fn namespaces(&self, c_view: &SurfaceView<'a>, i_view: &SurfaceView<'a>) -> Vec<MappingNode<'a>> {
        let keys: BTreeSet<&String> = c_view.keys().chain(i_view.keys()).collect();
        keys.into_iter()
            .filter_map(|key| {
                let c_group = c_view.get(key);
                let i_group = i_view.get(key);
                let correspondence = Correspondence::from_sides(
                    c_group.and_then(|g| g.declared).map(Element::Namespace),
                    i_group.and_then(|g| g.declared).map(Element::Namespace),
                )?;
                let types_of = |group: Option<&NamespaceGroup<'a>>| -> Vec<Element<'a>> {
                    group
                        .map(|g| g.types.iter().copied().map(Element::Type).collect())
                        .unwrap_or_default()
                };
                let children = self
                    .pair(types_of(c_group), types_of(i_group))
                    .into_iter()
                    .filter_map(|(c, i)| self.type_node(c, i))
                    .collect();
                Some(MappingNode::new(correspondence, children))
            })
            .collect()
    }

    fn type_node(
        &self,
        contract: Option<Element<'a>>,
        implementation: Option<Element<'a>>,
    ) -> Option<MappingNode<'a>> {
        let correspondence = Correspondence::from_sides(contract, implementation)?;
        let children = self
            .pair(self.members_of(contract), self.members_of(implementation))
            .into_iter()
            .filter_map(|(c, i)| Correspondence::from_sides(c, i))
            .map(|member| MappingNode::new(member, Vec::new()))
            .collect();
        Some(MappingNode::new(correspondence, children))
    }

    fn members_of(&self, element: Option<Element<'a>>) -> Vec<Element<'a>> {
        match element.and_then(|el| el.as_type()) {
            Some(ty) => ty
                .members
                .iter()
                .map(|member| Element::Member(ty, member))
                .filter(|el| self.filter.is_reachable(*el))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Pair two sibling lists.
    ///
    /// Implementation elements are bucketed by hash; each contract element
    /// takes the first unused equal element of its bucket.
    fn pair(
        &self,
        contract: Vec<Element<'a>>,
        implementation: Vec<Element<'a>>,
    ) -> Vec<(Option<Element<'a>>, Option<Element<'a>>)> {
        let mut buckets: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
        for (idx, el) in implementation.iter().enumerate() {
            buckets
                .entry(self.comparer.hash(*el, Side::Implementation))
                .or_default()
                .push(idx);
        }

        let mut used = vec![false; implementation.len()];
        let mut keyed: Vec<(ElementIdentity, u8, Option<Element<'a>>, Option<Element<'a>>)> =
            Vec::with_capacity(contract.len() + implementation.len());

        for c in contract {
            let found = buckets
                .get(&self.comparer.hash(c, Side::Contract))
                .and_then(|bucket| {
                    bucket
                        .iter()
                        .copied()
                        .find(|&idx| !used[idx] && self.comparer.equal(c, implementation[idx]))
                });
            let identity = self.comparer.identity(c, Side::Contract);
            match found {
                Some(idx) => {
                    used[idx] = true;
                    keyed.push((identity, 0, Some(c), Some(implementation[idx])));
                }
                None => keyed.push((identity, 1, Some(c), None)),
            }
        }

        for (idx, el) in implementation.iter().enumerate() {
            if !used[idx] {
                let identity = self.comparer.identity(*el, Side::Implementation);
                keyed.push((identity, 2, None, Some(*el)));
            }
        }

        keyed.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));
        keyed.into_iter().map(|(_, _, c, i)| (c, i)).collect()
    }

    /// Reachable types of an assembly, including resolved forwarders when the
    /// filter asks for them.
    fn view(&self, assembly: Option<&'a AssemblyDef>, side: Side) -> SurfaceView<'a> {
        let mut view = SurfaceView::new();
        let Some(assembly) = assembly else {
            return view;
        };

        for ty in assembly.types() {
            if self.filter.is_reachable(Element::Type(ty)) {
                self.insert(&mut view, ty, side);
            }
        }

        if self.filter.include_forwarded_types() {
            let side_assemblies = match side {
                Side::Contract => self.contract,
                Side::Implementation => self.implementation,
            };
            for forwarder in &assembly.forwarded_types {
                if assembly.find_type(&forwarder.type_name).is_some() {
                    continue;
                }
                match resolve_forwarder(forwarder, side_assemblies) {
                    Some(ty) if self.filter.is_reachable(Element::Type(ty)) => {
                        self.insert(&mut view, ty, side);
                    }
                    Some(_) => {}
                    None => tracing::warn!(
                        assembly = %assembly.name,
                        reference = %forwarder.type_name,
                        target = %forwarder.target_assembly,
                        "Unresolved type forwarder; skipping"
                    ),
                }
            }
        }

        view
    }

    fn insert(&self, view: &mut SurfaceView<'a>, ty: &'a TypeDef, side: Side) {
        let full_name = ty.full_name();
        let canonical = self.comparer.canonical_name(&full_name, side);
        let group = view.entry(namespace_of(&canonical).to_string()).or_default();
        let declared = ty.namespace.as_str();
        group.declared = Some(group.declared.map_or(declared, |d| d.min(declared)));
        group.types.push(ty);
    }
}

/// Follow a forwarder (and any forwarders it lands on) to a type definition.
fn resolve_forwarder<'a>(
    forwarder: &'a TypeForwarderDef,
    assemblies: &[&'a AssemblyDef],
) -> Option<&'a TypeDef> {
    let mut target: &'a str = &forwarder.target_assembly;
    for _ in 0..MAX_FORWARDER_HOPS {
        let assembly: &'a AssemblyDef = assemblies.iter().copied().find(|asm| asm.name == target)?;
        if let Some(ty) = assembly.find_type(&forwarder.type_name) {
            return Some(ty);
        }
        target = &assembly.find_forwarder(&forwarder.type_name)?.target_assembly;
    }
    None
}
