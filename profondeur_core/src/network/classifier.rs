//! Derived facts about a single reaction: participant roles, reversibility, and whether the
//! reaction converts chemicals, moves them between compartments, or both.
use indexmap::IndexSet;
use serde::Serialize;

use crate::identifier::compartmental_metabolite;
use crate::metabolic_model::reaction::Reaction;
use crate::network::NetworkError;

/// Role of a metabolite in a reaction, derived once from its stoichiometric coefficient
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Role {
    /// Coefficient of exactly -1
    Reactant,
    /// Coefficient of exactly +1
    Product,
    /// Any other coefficient, including zero and non unit stoichiometry
    Unsupported(f64),
}

impl Role {
    pub fn from_coefficient(coefficient: f64) -> Role {
        if coefficient == -1. {
            Role::Reactant
        } else if coefficient == 1. {
            Role::Product
        } else {
            Role::Unsupported(coefficient)
        }
    }
}

/// Role of `metabolite` (a compartmental identifier) in `reaction`, `None` if it does not
/// participate
pub fn role_of(reaction: &Reaction, metabolite: &str) -> Option<Role> {
    reaction
        .metabolites
        .get(metabolite)
        .map(|coefficient| Role::from_coefficient(*coefficient))
}

/// A metabolite participating in a reaction
#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    /// Compartmental metabolite identifier, as used in the reaction's stoichiometry
    pub metabolite: String,
    /// General metabolite identifier
    pub general: String,
    /// Compartment the metabolite participates in
    pub compartment: String,
    /// Either [`Role::Reactant`] or [`Role::Product`]
    pub role: Role,
}

/// A metabolite which moves between compartments in a reaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transport {
    /// General metabolite identifier
    pub metabolite: String,
    /// Every compartment the metabolite occupies as reactant or product
    pub compartments: Vec<String>,
}

/// Classification of a reaction's participants
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionClassification {
    /// Whether the reaction can carry flux in both directions
    pub reversible: bool,
    /// Participants in the order of the reaction's stoichiometry
    pub participants: Vec<Participant>,
}

impl ReactionClassification {
    /// Classify the participants of a reaction
    ///
    /// # Errors
    /// - [`NetworkError::UnsupportedStoichiometry`] if any coefficient is not -1 or +1
    /// - [`NetworkError::MalformedIdentifier`] if a participant identifier has no compartment
    pub fn classify(reaction: &Reaction) -> Result<ReactionClassification, NetworkError> {
        let mut participants = Vec::with_capacity(reaction.metabolites.len());
        for (met_id, coefficient) in &reaction.metabolites {
            let role = Role::from_coefficient(*coefficient);
            if let Role::Unsupported(coefficient) = role {
                return Err(NetworkError::UnsupportedStoichiometry {
                    reaction: reaction.id.clone(),
                    metabolite: met_id.clone(),
                    coefficient,
                });
            }
            let met = compartmental_metabolite(met_id)?;
            participants.push(Participant {
                metabolite: met.id.to_string(),
                general: met.general.to_string(),
                compartment: met.compartment.to_string(),
                role,
            });
        }
        Ok(ReactionClassification {
            reversible: reaction.is_reversible(),
            participants,
        })
    }

    /// Participants with the given role
    pub fn participants_by_role(&self, role: Role) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(move |p| p.role == role)
    }

    /// Compartmental identifiers of the participants with the given role
    pub fn metabolites_by_role(&self, role: Role) -> IndexSet<&str> {
        self.participants_by_role(role)
            .map(|p| p.metabolite.as_str())
            .collect()
    }

    /// Every compartment a participant is located in
    pub fn compartments(&self) -> IndexSet<&str> {
        self.participants
            .iter()
            .map(|p| p.compartment.as_str())
            .collect()
    }

    fn compartments_by_role(&self, role: Role) -> IndexSet<&str> {
        self.participants_by_role(role)
            .map(|p| p.compartment.as_str())
            .collect()
    }

    fn chemicals_by_role(&self, role: Role) -> IndexSet<&str> {
        self.participants_by_role(role)
            .map(|p| p.general.as_str())
            .collect()
    }

    /// Whether reactants and products occupy different sets of compartments
    pub fn compartments_changed(&self) -> bool {
        self.compartments_by_role(Role::Reactant) != self.compartments_by_role(Role::Product)
    }

    /// Whether reactants and products are different sets of general metabolites
    pub fn chemicals_changed(&self) -> bool {
        self.chemicals_by_role(Role::Reactant) != self.chemicals_by_role(Role::Product)
    }

    /// Whether the reaction converts one chemical into another
    pub fn conversion(&self) -> bool {
        self.chemicals_changed()
    }

    /// Whether participants span more than one compartment
    pub fn dispersal(&self) -> bool {
        self.compartments().len() > 1
    }

    /// Metabolites which participate as both reactant and product, but in different compartments
    pub fn transports(&self) -> Vec<Transport> {
        let products = self.chemicals_by_role(Role::Product);
        let mut transports = Vec::new();
        for general in self.chemicals_by_role(Role::Reactant) {
            if !products.contains(general) {
                continue;
            }
            let of_role = |role: Role| -> IndexSet<&str> {
                self.participants_by_role(role)
                    .filter(|p| p.general == general)
                    .map(|p| p.compartment.as_str())
                    .collect()
            };
            let reactant_compartments = of_role(Role::Reactant);
            let product_compartments = of_role(Role::Product);
            if reactant_compartments != product_compartments {
                let compartments = reactant_compartments
                    .union(&product_compartments)
                    .map(|c| c.to_string())
                    .collect();
                transports.push(Transport {
                    metabolite: general.to_string(),
                    compartments,
                });
            }
        }
        transports
    }

    /// Whether any metabolite moves between compartments
    pub fn is_transport(&self) -> bool {
        !self.transports().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn reaction(metabolites: &[(&str, f64)], lower_bound: f64, upper_bound: f64) -> Reaction {
        ReactionBuilder::default()
            .id("R".to_string())
            .metabolites(
                metabolites
                    .iter()
                    .map(|(m, c)| (m.to_string(), *c))
                    .collect(),
            )
            .lower_bound(lower_bound)
            .upper_bound(upper_bound)
            .build()
            .unwrap()
    }

    #[test]
    fn roles() {
        assert_eq!(Role::from_coefficient(-1.), Role::Reactant);
        assert_eq!(Role::from_coefficient(1.), Role::Product);
        assert_eq!(Role::from_coefficient(0.), Role::Unsupported(0.));
        assert_eq!(Role::from_coefficient(2.), Role::Unsupported(2.));
        assert_eq!(Role::from_coefficient(-0.5), Role::Unsupported(-0.5));
    }

    #[test]
    fn role_lookup() {
        let rxn = reaction(&[("a_c", -1.), ("b_c", 1.), ("h_c", 2.)], 0., 1000.);
        assert_eq!(role_of(&rxn, "a_c"), Some(Role::Reactant));
        assert_eq!(role_of(&rxn, "b_c"), Some(Role::Product));
        assert_eq!(role_of(&rxn, "h_c"), Some(Role::Unsupported(2.)));
        assert_eq!(role_of(&rxn, "z_c"), None);
    }

    #[test]
    fn unsupported_stoichiometry_fails() {
        let rxn = reaction(&[("a_c", -1.), ("b_c", 2.)], 0., 1000.);
        match ReactionClassification::classify(&rxn) {
            Err(NetworkError::UnsupportedStoichiometry {
                reaction,
                metabolite,
                coefficient,
            }) => {
                assert_eq!(reaction, "R");
                assert_eq!(metabolite, "b_c");
                assert_eq!(coefficient, 2.);
            }
            other => panic!("Unexpected classification {:?}", other),
        }
    }

    #[test]
    fn malformed_participant_fails() {
        let rxn = reaction(&[("a", -1.), ("b_c", 1.)], 0., 1000.);
        assert!(matches!(
            ReactionClassification::classify(&rxn),
            Err(NetworkError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn partition() {
        let rxn = reaction(&[("a_c", -1.), ("b_c", 1.), ("c_c", -1.)], 0., 1000.);
        let class = ReactionClassification::classify(&rxn).unwrap();
        assert!(!class.reversible);
        assert_eq!(
            class.metabolites_by_role(Role::Reactant),
            IndexSet::from(["a_c", "c_c"])
        );
        assert_eq!(class.metabolites_by_role(Role::Product), IndexSet::from(["b_c"]));
    }

    #[test]
    fn conversion() {
        let rxn = reaction(&[("a_c", -1.), ("b_c", 1.)], -10., 10.);
        let class = ReactionClassification::classify(&rxn).unwrap();
        assert!(class.reversible);
        assert!(class.chemicals_changed());
        assert!(class.conversion());
        assert!(!class.compartments_changed());
        assert!(!class.dispersal());
        assert!(!class.is_transport());
    }

    #[test]
    fn pure_transport() {
        let rxn = reaction(&[("atp_c", -1.), ("atp_m", 1.)], 0., 1000.);
        let class = ReactionClassification::classify(&rxn).unwrap();
        assert!(!class.chemicals_changed());
        assert!(class.compartments_changed());
        assert!(class.dispersal());
        assert_eq!(
            class.transports(),
            vec![Transport {
                metabolite: "atp".to_string(),
                compartments: vec!["c".to_string(), "m".to_string()],
            }]
        );
    }

    #[test]
    fn antiport_keeps_compartment_sets() {
        // Exchange of atp and adp across the membrane, both sides touch both compartments
        let rxn = reaction(
            &[("atp_m", -1.), ("adp_c", -1.), ("atp_c", 1.), ("adp_m", 1.)],
            0.,
            1000.,
        );
        let class = ReactionClassification::classify(&rxn).unwrap();
        assert!(!class.compartments_changed());
        assert!(!class.chemicals_changed());
        assert!(class.dispersal());
        assert_eq!(class.transports().len(), 2);
    }

    #[test]
    fn coupled_conversion_and_transport() {
        let rxn = reaction(&[("glc_e", -1.), ("pep_c", -1.), ("g6p_c", 1.), ("pyr_c", 1.)], 0., 1000.);
        let class = ReactionClassification::classify(&rxn).unwrap();
        assert!(class.chemicals_changed());
        assert!(class.compartments_changed());
        assert!(class.transports().is_empty());
        assert_eq!(class.compartments(), IndexSet::from(["e", "c"]));
    }

    #[test]
    fn exchange_reaction() {
        let rxn = reaction(&[("glc_e", -1.)], -10., 1000.);
        let class = ReactionClassification::classify(&rxn).unwrap();
        assert!(class.compartments_changed());
        assert!(class.chemicals_changed());
        assert!(!class.dispersal());
    }
}
