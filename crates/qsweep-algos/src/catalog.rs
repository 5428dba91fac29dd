//! Sweep catalog: one entry per (family, size) pair.
//!
//! Entries take no arguments at run time; everything a circuit needs is fixed
//! in its [`AlgorithmParameters`] when the catalog is built.

use serde::{Deserialize, Serialize};

use qsweep_ir::{Circuit, IrError, MeasurementOutcome};
use qsweep_sim::{HeisenbergChain, magnetization};

use crate::error::{AlgoError, AlgoResult};
use crate::grover::is_marked;
use crate::params::{AlgorithmParameters, Family, GroverParams, QpeParams, VqeParams};
use crate::qpe::{estimate_phase, estimation_error, true_phase};
use crate::vqe::Molecule;

/// Sizes and fixed parameters of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    /// Grover register widths.
    pub grover_sizes: Vec<usize>,
    /// Measure Grover and ansatz registers.
    pub measure: bool,
    /// Heisenberg chain lengths.
    pub heisenberg_lengths: Vec<usize>,
    /// Exchange coupling J.
    pub coupling: f64,
    /// Trotter step size.
    pub dt: f64,
    /// Total evolution time.
    pub total_time: f64,
    /// Counting register widths.
    pub qpe_sizes: Vec<usize>,
    /// `Rz` angle whose phase is estimated.
    pub theta: f64,
    /// Ansatz molecules.
    pub molecules: Vec<Molecule>,
    /// Ansatz angle.
    pub vqe_angle: f64,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            grover_sizes: vec![5, 10, 15, 20, 25],
            measure: true,
            heisenberg_lengths: vec![10, 20, 30, 40, 50],
            coupling: 1.0,
            dt: 0.5,
            total_time: 5.0,
            qpe_sizes: vec![3, 4, 5, 6, 7, 8],
            theta: 1.0,
            molecules: Molecule::ALL.to_vec(),
            vqe_angle: 0.1,
        }
    }
}

/// Classical values read out of one measured run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Readout {
    /// Grover: whether the marked pattern was measured.
    Search {
        /// Measured bits.
        bits: String,
        /// Bits equal the marked pattern.
        found_marked: bool,
    },
    /// Heisenberg: fraction of spins measured as one.
    Magnetization {
        /// Value in `[0, 1]`.
        value: f64,
    },
    /// QPE: estimated phase against the exact one.
    Phase {
        /// Binary fraction read from the counting register.
        estimated: f64,
        /// `θ/(4π)`.
        true_phase: f64,
        /// Absolute difference.
        error: f64,
    },
    /// VQE: raw measured bit-string.
    Ansatz {
        /// Measured bits.
        bits: String,
    },
}

/// One runnable (family, size) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique name, `<family>_<size>`.
    pub name: String,
    /// Parameters fixed at catalog time.
    pub params: AlgorithmParameters,
}

impl Entry {
    /// Wrap `params` under its canonical name.
    pub fn new(params: AlgorithmParameters) -> Self {
        let name = format!("{}_{}", params.family(), params.size_label());
        Self { name, params }
    }

    /// Algorithm family.
    pub fn family(&self) -> Family {
        self.params.family()
    }

    /// Build a fresh circuit.
    pub fn build(&self) -> AlgoResult<Circuit> {
        self.params.build()
    }

    /// Reduce a measurement outcome through the family readout.
    pub fn readout(&self, outcome: &MeasurementOutcome) -> AlgoResult<Readout> {
        let readout = match &self.params {
            AlgorithmParameters::Grover(p) => {
                if outcome.len() != p.num_qubits {
                    return Err(IrError::parameter(
                        "outcome",
                        format!("expected {} bits, got {}", p.num_qubits, outcome.len()),
                    )
                    .into());
                }
                Readout::Search {
                    bits: outcome.to_string(),
                    found_marked: is_marked(outcome),
                }
            }
            AlgorithmParameters::Heisenberg(chain) => Readout::Magnetization {
                value: magnetization(outcome, chain.length)?,
            },
            AlgorithmParameters::Qpe(p) => {
                let estimated = estimate_phase(outcome)?;
                let exact = true_phase(p.theta);
                Readout::Phase {
                    estimated,
                    true_phase: exact,
                    error: estimation_error(estimated, exact),
                }
            }
            AlgorithmParameters::Vqe(_) => Readout::Ansatz {
                bits: outcome.to_string(),
            },
        };
        Ok(readout)
    }
}

/// Enumerate every entry of `plan`, grouped by family.
pub fn catalog(plan: &SweepPlan) -> Vec<Entry> {
    let grover = plan.grover_sizes.iter().map(|&num_qubits| {
        AlgorithmParameters::Grover(GroverParams {
            num_qubits,
            measure: plan.measure,
        })
    });
    let heisenberg = plan.heisenberg_lengths.iter().map(|&length| {
        AlgorithmParameters::Heisenberg(HeisenbergChain {
            length,
            coupling: plan.coupling,
            dt: plan.dt,
            total_time: plan.total_time,
        })
    });
    let qpe = plan.qpe_sizes.iter().map(|&counting_qubits| {
        AlgorithmParameters::Qpe(QpeParams {
            counting_qubits,
            theta: plan.theta,
        })
    });
    let vqe = plan.molecules.iter().map(|&molecule| {
        AlgorithmParameters::Vqe(VqeParams {
            molecule,
            angle: plan.vqe_angle,
            measure: plan.measure,
        })
    });

    grover
        .chain(heisenberg)
        .chain(qpe)
        .chain(vqe)
        .map(Entry::new)
        .collect()
}

/// Look up an entry by name.
pub fn find<'a>(entries: &'a [Entry], name: &str) -> AlgoResult<&'a Entry> {
    entries
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| AlgoError::UnknownEntry(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let entries = catalog(&SweepPlan::default());
        assert_eq!(entries.len(), 5 + 5 + 6 + 3);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names[0], "grover_5");
        assert!(names.contains(&"heisenberg_50"));
        assert!(names.contains(&"qpe_8"));
        assert_eq!(names.last(), Some(&"vqe_beh2"));
    }

    #[test]
    fn test_find() {
        let entries = catalog(&SweepPlan::default());
        assert_eq!(find(&entries, "qpe_3").unwrap().family(), Family::Qpe);
        assert!(matches!(
            find(&entries, "qpe_99"),
            Err(AlgoError::UnknownEntry(_))
        ));
    }

    #[test]
    fn test_phase_readout() {
        let entry = Entry::new(AlgorithmParameters::Qpe(QpeParams {
            counting_qubits: 4,
            theta: 1.0,
        }));
        let outcome = MeasurementOutcome::from_bitstring("1010").unwrap();
        let Readout::Phase {
            estimated,
            true_phase,
            error,
        } = entry.readout(&outcome).unwrap()
        else {
            panic!("expected phase readout");
        };
        assert_eq!(estimated, 0.3125);
        assert!((true_phase - 1.0 / (4.0 * std::f64::consts::PI)).abs() < 1e-15);
        assert!((error - (0.3125 - true_phase)).abs() < 1e-15);
    }

    #[test]
    fn test_search_readout_requires_full_register() {
        let entry = Entry::new(AlgorithmParameters::Grover(GroverParams {
            num_qubits: 4,
            measure: false,
        }));
        assert!(entry.readout(&MeasurementOutcome::default()).is_err());

        let found = entry
            .readout(&MeasurementOutcome::from_bitstring("0101").unwrap())
            .unwrap();
        assert_eq!(
            found,
            Readout::Search {
                bits: "0101".into(),
                found_marked: true
            }
        );
    }

    #[test]
    fn test_readout_json_is_tagged() {
        let json = serde_json::to_value(Readout::Magnetization { value: 0.5 }).unwrap();
        assert_eq!(json["kind"], "magnetization");
        assert_eq!(json["value"], 0.5);
    }
}
