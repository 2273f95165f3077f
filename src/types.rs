use ethers::types::{Address, H256};
use ethers::utils::keccak256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An identity on the ledger, referenced by asset records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Public verification key the party signs with
    pub key: Address,
}

/// One trackable vehicle on the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub model: String,
    pub manufacturer: Party,
    pub owner: Party,
}

/// A plain message between two parties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message: String,
    pub sender: Party,
    pub recipient: Party,
}

/// One immutable unit of ledger state
///
/// Records are never mutated in place: a transition consumes prior records
/// and produces new ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StateRecord {
    Vehicle(VehicleRecord),
    Message(MessageRecord),
}

impl StateRecord {
    /// Schema name used in diagnostics and rejection reasons
    pub fn schema(&self) -> &'static str {
        match self {
            StateRecord::Vehicle(_) => "Vehicle",
            StateRecord::Message(_) => "Message",
        }
    }
}

/// The intent a transaction proposal is tagged with
///
/// Closed set: a proposal carrying any other tag fails deserialization at
/// the boundary, and a new variant cannot be added without giving it an
/// explicit rule arm in the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Shipment,
}

impl Command {
    /// Wire tag of this command kind
    pub fn tag(&self) -> &'static str {
        match self {
            Command::Shipment => "Shipment",
        }
    }
}

/// A proposed state transition submitted for verification
///
/// Assembled and signed entirely by the host runtime; the verifier only
/// reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionProposal {
    /// Records consumed by the transition
    pub inputs: Vec<StateRecord>,
    /// Records created by the transition
    pub outputs: Vec<StateRecord>,
    /// Tagged intents; a valid proposal carries exactly one
    pub commands: Vec<Command>,
    /// The set of keys that must have signed (duplicates carry no meaning)
    pub required_signers: Vec<Address>,
}

impl TransactionProposal {
    /// Compute the digest used to reference this proposal in logs and reports
    pub fn hash(&self) -> H256 {
        // Encode proposal fields for hashing
        let mut data = Vec::new();

        for command in &self.commands {
            data.extend_from_slice(command.tag().as_bytes());
        }

        data.extend_from_slice(&(self.inputs.len() as u64).to_be_bytes());
        data.extend_from_slice(&(self.outputs.len() as u64).to_be_bytes());
        for record in self.inputs.iter().chain(&self.outputs) {
            encode_record(&mut data, record);
        }

        for signer in &self.required_signers {
            data.extend_from_slice(signer.as_bytes());
        }

        H256::from_slice(&keccak256(data))
    }
}

fn encode_record(data: &mut Vec<u8>, record: &StateRecord) {
    data.extend_from_slice(record.schema().as_bytes());
    match record {
        StateRecord::Vehicle(vehicle) => {
            data.extend_from_slice(vehicle.model.as_bytes());
            encode_party(data, &vehicle.manufacturer);
            encode_party(data, &vehicle.owner);
        }
        StateRecord::Message(message) => {
            data.extend_from_slice(message.message.as_bytes());
            encode_party(data, &message.sender);
            encode_party(data, &message.recipient);
        }
    }
}

fn encode_party(data: &mut Vec<u8>, party: &Party) {
    data.extend_from_slice(party.name.as_bytes());
    data.extend_from_slice(party.key.as_bytes());
}

/// Rule violations that reject a transaction proposal
///
/// All of these are caused by the proposer; none are transient. The first
/// failing check determines which one is reported.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("transaction must carry exactly one command, found {commands}")]
    MalformedTransaction { commands: usize },
    #[error("shipment takes no inputs and exactly one output, found {inputs} inputs and {outputs} outputs")]
    InvalidShape { inputs: usize, outputs: usize },
    #[error("shipment output must be a Vehicle record, found a {found} record")]
    InvalidOutputType { found: String },
    #[error("only model {expected} can be shipped, found {found}")]
    InvalidAssetValue { expected: String, found: String },
    #[error("manufacturer key {manufacturer:?} is not among the required signers")]
    MissingRequiredSignature { manufacturer: Address },
}

/// Verification report sent back to the host runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub tx_hash: H256,
    pub verdict: Verdict,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected { reason: String },
}
