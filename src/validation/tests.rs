//! Tests for the contract rules
//!
//! Test suite verifying the command, shape, content, and signer rules
//! applied to proposed Shipment transactions

#[cfg(test)]
mod tests {
    use crate::{
        Command, MessageRecord, Party, StateRecord, TransactionProposal, ValidationError,
        VehicleRecord, config::RulesConfig, validation::Validator,
    };
    use ethers::types::Address;

    /// Helper function to create a party with a fixed verification key
    fn party(name: &str, key_byte: u8) -> Party {
        Party {
            name: name.to_string(),
            key: Address::repeat_byte(key_byte),
        }
    }

    fn manufacturer() -> Party {
        party("Tesla Inc", 0x11)
    }

    fn owner() -> Party {
        party("Coast Dealership", 0x22)
    }

    /// Helper function to create a vehicle record of the given model
    fn vehicle(model: &str) -> StateRecord {
        StateRecord::Vehicle(VehicleRecord {
            model: model.to_string(),
            manufacturer: manufacturer(),
            owner: owner(),
        })
    }

    /// Helper function to create a message record (a non-vehicle schema)
    fn message() -> StateRecord {
        StateRecord::Message(MessageRecord {
            message: "Hello-World".to_string(),
            sender: manufacturer(),
            recipient: owner(),
        })
    }

    /// A proposal that satisfies every shipment rule:
    /// no inputs, one Cybertruck output, manufacturer among the signers
    fn valid_shipment() -> TransactionProposal {
        TransactionProposal {
            inputs: vec![],
            outputs: vec![vehicle("Cybertruck")],
            commands: vec![Command::Shipment],
            required_signers: vec![manufacturer().key],
        }
    }

    fn cybertruck_validator() -> Validator {
        Validator::new(RulesConfig {
            shipment_model: "Cybertruck".to_string(),
        })
    }

    #[test]
    fn test_valid_shipment_is_accepted() {
        let validator = cybertruck_validator();
        assert_eq!(validator.validate(&valid_shipment()), Ok(()));
    }

    #[test]
    fn test_shipment_with_inputs_is_rejected() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.inputs = vec![vehicle("Cybertruck")];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::InvalidShape {
                inputs: 1,
                outputs: 1,
            })
        );
    }

    #[test]
    fn test_shipment_with_no_outputs_is_rejected() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.outputs = vec![];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::InvalidShape {
                inputs: 0,
                outputs: 0,
            })
        );
    }

    #[test]
    fn test_shipment_with_two_outputs_is_rejected() {
        let validator = cybertruck_validator();

        // Only one vehicle can be shipped at a time
        let mut proposal = valid_shipment();
        proposal.outputs = vec![vehicle("Cybertruck"), vehicle("Cybertruck")];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::InvalidShape {
                inputs: 0,
                outputs: 2,
            })
        );
    }

    #[test]
    fn test_non_vehicle_output_is_rejected() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.outputs = vec![message()];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::InvalidOutputType {
                found: "Message".to_string(),
            })
        );
    }

    #[test]
    fn test_wrong_model_is_rejected() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.outputs = vec![vehicle("Model3")];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::InvalidAssetValue {
                expected: "Cybertruck".to_string(),
                found: "Model3".to_string(),
            })
        );
    }

    #[test]
    fn test_shipment_without_manufacturer_signature_is_rejected() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.required_signers = vec![];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::MissingRequiredSignature {
                manufacturer: manufacturer().key,
            })
        );
    }

    #[test]
    fn test_other_signers_cannot_replace_the_manufacturer() {
        let validator = cybertruck_validator();

        // The owner and a third party sign, but the manufacturer does not
        let mut proposal = valid_shipment();
        proposal.required_signers = vec![owner().key, party("Notary", 0x33).key];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::MissingRequiredSignature {
                manufacturer: manufacturer().key,
            })
        );
    }

    #[test]
    fn test_extra_signers_are_allowed() {
        let validator = cybertruck_validator();

        // Signer rule is membership, not an exact match
        let mut proposal = valid_shipment();
        proposal.required_signers = vec![owner().key, manufacturer().key, party("Notary", 0x33).key];

        assert_eq!(validator.validate(&proposal), Ok(()));
    }

    #[test]
    fn test_proposal_with_no_command_is_rejected() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.commands = vec![];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::MalformedTransaction { commands: 0 })
        );
    }

    #[test]
    fn test_proposal_with_multiple_commands_is_rejected() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.commands = vec![Command::Shipment, Command::Shipment];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::MalformedTransaction { commands: 2 })
        );
    }

    #[test]
    fn test_command_count_is_checked_first() {
        let validator = cybertruck_validator();

        // Broken shape AND broken command count: the command count decides
        let mut proposal = valid_shipment();
        proposal.commands = vec![Command::Shipment, Command::Shipment];
        proposal.outputs = vec![];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::MalformedTransaction { commands: 2 })
        );
    }

    #[test]
    fn test_shape_is_checked_before_content() {
        let validator = cybertruck_validator();

        // Broken shape AND wrong model: the shape rule decides
        let mut proposal = valid_shipment();
        proposal.inputs = vec![vehicle("Cybertruck")];
        proposal.outputs = vec![vehicle("Model3")];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::InvalidShape {
                inputs: 1,
                outputs: 1,
            })
        );
    }

    #[test]
    fn test_content_is_checked_before_signers() {
        let validator = cybertruck_validator();

        // Wrong model AND missing signature: the content rule decides
        let mut proposal = valid_shipment();
        proposal.outputs = vec![vehicle("Model3")];
        proposal.required_signers = vec![];

        assert_eq!(
            validator.validate(&proposal),
            Err(ValidationError::InvalidAssetValue {
                expected: "Cybertruck".to_string(),
                found: "Model3".to_string(),
            })
        );
    }

    #[test]
    fn test_expected_model_is_configurable() {
        // The accepted model comes from the rules config, not a constant
        let validator = Validator::new(RulesConfig {
            shipment_model: "Roadster".to_string(),
        });

        let mut proposal = valid_shipment();
        proposal.outputs = vec![vehicle("Roadster")];
        assert_eq!(validator.validate(&proposal), Ok(()));

        assert_eq!(
            validator.validate(&valid_shipment()),
            Err(ValidationError::InvalidAssetValue {
                expected: "Roadster".to_string(),
                found: "Cybertruck".to_string(),
            })
        );
    }

    #[test]
    fn test_rejection_reasons_are_descriptive() {
        let validator = cybertruck_validator();

        let mut proposal = valid_shipment();
        proposal.outputs = vec![vehicle("Model3")];

        let reason = validator.validate(&proposal).unwrap_err().to_string();
        assert!(reason.contains("Cybertruck"));
        assert!(reason.contains("Model3"));
    }

    #[test]
    fn test_unknown_command_tags_fail_deserialization() {
        // Unrecognized intents are rejected at the boundary instead of
        // passing through validation unchecked
        let json = serde_json::json!({
            "inputs": [],
            "outputs": [],
            "commands": ["Teleport"],
            "required_signers": [],
        });

        assert!(serde_json::from_value::<TransactionProposal>(json).is_err());
    }

    #[test]
    fn test_proposal_hash_is_deterministic() {
        assert_eq!(valid_shipment().hash(), valid_shipment().hash());
    }

    #[test]
    fn test_proposal_hash_tracks_contents() {
        let mut changed = valid_shipment();
        changed.outputs = vec![vehicle("Model3")];

        assert_ne!(valid_shipment().hash(), changed.hash());
    }
}
