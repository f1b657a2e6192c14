//! Detection of replicate reactions, reactions which convert the same reactants into the same
//! products (regardless of compartment)
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::metabolic_model::model::Model;
use crate::network::classifier::{ReactionClassification, Role};
use crate::network::NetworkError;

/// Reactions sharing identical sets of reactant and product general metabolites
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplicateGroup {
    /// Reaction ids in model order
    pub reactions: Vec<String>,
    pub reactants: BTreeSet<String>,
    pub products: BTreeSet<String>,
}

impl ReplicateGroup {
    /// Whether more than one reaction shares this combination
    pub fn is_replicated(&self) -> bool {
        self.reactions.len() > 1
    }
}

/// Group every reaction of the model by its reactant and product general metabolites
///
/// Every reaction belongs to exactly one group, groups are returned in the order their first
/// reaction appears in the model.
pub fn collect_replicate_reactions(model: &Model) -> Result<Vec<ReplicateGroup>, NetworkError> {
    let mut groups: IndexMap<(BTreeSet<String>, BTreeSet<String>), Vec<String>> = IndexMap::new();
    for (rxn_id, rxn) in &model.reactions {
        let classification = ReactionClassification::classify(rxn)?;
        let generals = |role: Role| -> BTreeSet<String> {
            classification
                .participants_by_role(role)
                .map(|p| p.general.clone())
                .collect()
        };
        let key = (generals(Role::Reactant), generals(Role::Product));
        groups.entry(key).or_default().push(rxn_id.clone());
    }
    Ok(groups
        .into_iter()
        .map(|((reactants, products), reactions)| ReplicateGroup {
            reactions,
            reactants,
            products,
        })
        .collect())
}

/// Reactions replicating `reaction_id`, including itself, empty if it is in no group
pub fn replicates_of<'a>(groups: &'a [ReplicateGroup], reaction_id: &str) -> &'a [String] {
    groups
        .iter()
        .find(|group| group.reactions.iter().any(|r| r == reaction_id))
        .map(|group| group.reactions.as_slice())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn add(model: &mut Model, id: &str, metabolites: &[(&str, f64)]) {
        model.add_reaction(
            ReactionBuilder::default()
                .id(id.to_string())
                .metabolites(
                    metabolites
                        .iter()
                        .map(|(m, c)| (m.to_string(), *c))
                        .collect(),
                )
                .build()
                .unwrap(),
        );
    }

    #[test]
    fn groups_across_compartments() {
        let mut model = Model::new_empty();
        add(&mut model, "HEX1", &[("glc_c", -1.), ("atp_c", -1.), ("g6p_c", 1.)]);
        add(&mut model, "PGI", &[("g6p_c", -1.), ("f6p_c", 1.)]);
        add(&mut model, "HEX1m", &[("atp_m", -1.), ("glc_m", -1.), ("g6p_m", 1.)]);

        let groups = collect_replicate_reactions(&model).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].reactions, vec!["HEX1", "HEX1m"]);
        assert!(groups[0].is_replicated());
        assert!(!groups[1].is_replicated());
        assert_eq!(
            groups[0].reactants,
            BTreeSet::from(["atp".to_string(), "glc".to_string()])
        );

        assert_eq!(replicates_of(&groups, "HEX1m"), ["HEX1", "HEX1m"]);
        assert_eq!(replicates_of(&groups, "PGI"), ["PGI"]);
        assert!(replicates_of(&groups, "NONE").is_empty());
    }

    #[test]
    fn direction_matters() {
        let mut model = Model::new_empty();
        add(&mut model, "F", &[("a_c", -1.), ("b_c", 1.)]);
        add(&mut model, "B", &[("b_c", -1.), ("a_c", 1.)]);
        let groups = collect_replicate_reactions(&model).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn unsupported_stoichiometry_propagates() {
        let mut model = Model::new_empty();
        add(&mut model, "F", &[("a_c", -2.), ("b_c", 1.)]);
        assert!(matches!(
            collect_replicate_reactions(&model),
            Err(NetworkError::UnsupportedStoichiometry { .. })
        ));
    }
}
