//! Per-family algorithm parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use qsweep_ir::{Circuit, IrError};
use qsweep_sim::{HeisenbergChain, evolution_circuit};

use crate::error::AlgoResult;
use crate::grover::search_circuit;
use crate::qpe::phase_estimation_circuit;
use crate::vqe::{Molecule, ansatz_circuit};

/// Algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Amplitude-amplification search.
    Grover,
    /// Trotterized Heisenberg XXX evolution.
    Heisenberg,
    /// Phase estimation.
    Qpe,
    /// Chemistry ansatz.
    Vqe,
}

impl Family {
    /// Every family, in catalog order.
    pub const ALL: [Family; 4] = [Family::Grover, Family::Heisenberg, Family::Qpe, Family::Vqe];

    /// Lower-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Grover => "grover",
            Family::Heisenberg => "heisenberg",
            Family::Qpe => "qpe",
            Family::Vqe => "vqe",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Family::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                IrError::parameter(
                    "family",
                    format!("unknown family '{s}' (expected grover, heisenberg, qpe or vqe)"),
                )
            })
    }
}

/// Grover search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroverParams {
    /// Search register width.
    pub num_qubits: usize,
    /// Measure the register at the end.
    pub measure: bool,
}

/// Phase-estimation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QpeParams {
    /// Counting register width.
    pub counting_qubits: usize,
    /// Angle of the `Rz` reference unitary.
    pub theta: f64,
}

/// Chemistry-ansatz parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VqeParams {
    /// Molecule whose excitation table is used.
    pub molecule: Molecule,
    /// Angle shared by every excitation.
    pub angle: f64,
    /// Measure the register at the end.
    pub measure: bool,
}

/// Configuration of one circuit, fixed before construction starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum AlgorithmParameters {
    /// Grover search.
    Grover(GroverParams),
    /// Heisenberg chain evolution.
    Heisenberg(HeisenbergChain),
    /// Phase estimation.
    Qpe(QpeParams),
    /// Chemistry ansatz.
    Vqe(VqeParams),
}

impl AlgorithmParameters {
    /// Family of these parameters.
    pub fn family(&self) -> Family {
        match self {
            AlgorithmParameters::Grover(_) => Family::Grover,
            AlgorithmParameters::Heisenberg(_) => Family::Heisenberg,
            AlgorithmParameters::Qpe(_) => Family::Qpe,
            AlgorithmParameters::Vqe(_) => Family::Vqe,
        }
    }

    /// Size label: qubit count, chain length, counting size or molecule.
    pub fn size_label(&self) -> String {
        match self {
            AlgorithmParameters::Grover(p) => p.num_qubits.to_string(),
            AlgorithmParameters::Heisenberg(c) => c.length.to_string(),
            AlgorithmParameters::Qpe(p) => p.counting_qubits.to_string(),
            AlgorithmParameters::Vqe(p) => p.molecule.to_string(),
        }
    }

    /// Build the circuit these parameters describe.
    pub fn build(&self) -> AlgoResult<Circuit> {
        match self {
            AlgorithmParameters::Grover(p) => search_circuit(p.num_qubits, p.measure),
            AlgorithmParameters::Heisenberg(chain) => Ok(evolution_circuit(chain)?),
            AlgorithmParameters::Qpe(p) => phase_estimation_circuit(p.counting_qubits, p.theta),
            AlgorithmParameters::Vqe(p) => ansatz_circuit(p.molecule, p.angle, p.measure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_parse() {
        for family in Family::ALL {
            assert_eq!(family.to_string().parse::<Family>().unwrap(), family);
        }
        assert_eq!("QPE".parse::<Family>().unwrap(), Family::Qpe);
        assert!("shor".parse::<Family>().is_err());
    }

    #[test]
    fn test_tagged_json() {
        let params = AlgorithmParameters::Qpe(QpeParams {
            counting_qubits: 3,
            theta: 1.0,
        });
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["family"], "qpe");
        assert_eq!(json["counting_qubits"], 3);

        let back: AlgorithmParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_build_dispatches() {
        let params = AlgorithmParameters::Grover(GroverParams {
            num_qubits: 3,
            measure: true,
        });
        assert_eq!(params.family(), Family::Grover);
        assert_eq!(params.size_label(), "3");
        assert_eq!(params.build().unwrap().name(), "grover_3");
    }
}
