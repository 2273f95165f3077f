use crate::config::RulesConfig;
use crate::{Command, StateRecord, TransactionProposal, ValidationError, VehicleRecord};
use tracing::{debug, warn};

/// Identifier hosts use to reference this rule set when building transactions
pub const CONTRACT_ID: &str = "contracts.vehicle.Shipment";

/// Validates transaction proposals against the vehicle contract rules
///
/// Pure and stateless: each call reads only its own input, so one instance
/// can be shared across any number of concurrent verifications.
pub struct Validator {
    rules: RulesConfig,
}

impl Validator {
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }

    /// Validate a transaction proposal
    /// Returns Ok(()) if valid, Err(ValidationError) for the first broken rule
    pub fn validate(&self, proposal: &TransactionProposal) -> Result<(), ValidationError> {
        debug!("Validating proposal {:?}", proposal.hash());

        // A proposal carries exactly one command
        let command = self.require_single_command(proposal)?;

        // Dispatch on the command; every known kind has an explicit rule arm
        match command {
            Command::Shipment => self.verify_shipment(proposal)?,
        }

        debug!("Proposal validation successful");
        Ok(())
    }

    /// Extract the proposal's single command
    fn require_single_command<'a>(
        &self,
        proposal: &'a TransactionProposal,
    ) -> Result<&'a Command, ValidationError> {
        match proposal.commands.as_slice() {
            [command] => Ok(command),
            commands => {
                warn!("Command count check failed: found {}", commands.len());
                Err(ValidationError::MalformedTransaction {
                    commands: commands.len(),
                })
            }
        }
    }

    /// Shipment rules: shape, then content, then signers
    fn verify_shipment(&self, proposal: &TransactionProposal) -> Result<(), ValidationError> {
        self.check_shape(proposal)?;
        let vehicle = self.check_content(proposal)?;
        self.check_signers(proposal, vehicle)?;
        Ok(())
    }

    /// A shipment consumes no records and creates exactly one
    fn check_shape(&self, proposal: &TransactionProposal) -> Result<(), ValidationError> {
        if !proposal.inputs.is_empty() || proposal.outputs.len() != 1 {
            warn!(
                "Shape check failed: {} inputs, {} outputs",
                proposal.inputs.len(),
                proposal.outputs.len()
            );
            return Err(ValidationError::InvalidShape {
                inputs: proposal.inputs.len(),
                outputs: proposal.outputs.len(),
            });
        }

        Ok(())
    }

    /// The created record must be a vehicle of the expected model
    fn check_content<'a>(
        &self,
        proposal: &'a TransactionProposal,
    ) -> Result<&'a VehicleRecord, ValidationError> {
        // The shape check guarantees exactly one output
        let output = &proposal.outputs[0];

        let vehicle = match output {
            StateRecord::Vehicle(vehicle) => vehicle,
            other => {
                warn!("Content check failed: output is a {} record", other.schema());
                return Err(ValidationError::InvalidOutputType {
                    found: other.schema().to_string(),
                });
            }
        };

        if vehicle.model != self.rules.shipment_model {
            warn!(
                "Content check failed: expected model {}, got {}",
                self.rules.shipment_model, vehicle.model
            );
            return Err(ValidationError::InvalidAssetValue {
                expected: self.rules.shipment_model.clone(),
                found: vehicle.model.clone(),
            });
        }

        Ok(vehicle)
    }

    /// The manufacturer of the shipped vehicle must be a required signer
    fn check_signers(
        &self,
        proposal: &TransactionProposal,
        vehicle: &VehicleRecord,
    ) -> Result<(), ValidationError> {
        let manufacturer_key = vehicle.manufacturer.key;

        if !proposal.required_signers.contains(&manufacturer_key) {
            warn!(
                "Signer check failed: manufacturer {} must sign",
                vehicle.manufacturer.name
            );
            return Err(ValidationError::MissingRequiredSignature {
                manufacturer: manufacturer_key,
            });
        }

        Ok(())
    }
}
