//! Fixed-angle chemistry ansatz.
//!
//! Each molecule is a fixed table: register width, electron count, and the
//! single and double excitations applied on top of the Hartree-Fock state.
//! Every excitation uses the same angle; no optimization loop is run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use qsweep_ir::{Circuit, CircuitBuilder, IrError, IrResult, QubitId, QubitRegister};
use tracing::debug;

use crate::error::AlgoResult;

/// Molecules with a built-in excitation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Molecule {
    /// Hydrogen.
    H2,
    /// Lithium hydride.
    LiH,
    /// Beryllium hydride.
    BeH2,
}

/// Excitation table of one molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoleculeSpec {
    /// Register width (spin orbitals).
    pub num_qubits: usize,
    /// Occupied orbitals in the Hartree-Fock state.
    pub electrons: usize,
    /// `(occupied, virtual)` pairs.
    pub singles: &'static [(usize, usize)],
    /// `(occupied, occupied, virtual, virtual)` quadruples.
    pub doubles: &'static [(usize, usize, usize, usize)],
}

impl Molecule {
    /// Every built-in molecule.
    pub const ALL: [Molecule; 3] = [Molecule::H2, Molecule::LiH, Molecule::BeH2];

    /// Excitation table.
    pub fn spec(self) -> MoleculeSpec {
        match self {
            Molecule::H2 => MoleculeSpec {
                num_qubits: 4,
                electrons: 2,
                singles: &[],
                doubles: &[(0, 1, 2, 3)],
            },
            Molecule::LiH => MoleculeSpec {
                num_qubits: 12,
                electrons: 4,
                singles: &[(0, 4), (1, 5)],
                doubles: &[(0, 1, 4, 5), (2, 3, 6, 7), (0, 2, 4, 6), (1, 3, 5, 7)],
            },
            Molecule::BeH2 => MoleculeSpec {
                num_qubits: 14,
                electrons: 6,
                singles: &[(0, 6), (1, 7), (2, 8)],
                doubles: &[
                    (0, 1, 6, 7),
                    (2, 3, 8, 9),
                    (0, 2, 6, 8),
                    (1, 3, 7, 9),
                    (4, 5, 10, 11),
                    (0, 4, 6, 10),
                ],
            },
        }
    }

    /// Lower-case identifier used in entry names.
    pub fn as_str(self) -> &'static str {
        match self {
            Molecule::H2 => "h2",
            Molecule::LiH => "lih",
            Molecule::BeH2 => "beh2",
        }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Molecule {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h2" => Ok(Molecule::H2),
            "lih" => Ok(Molecule::LiH),
            "beh2" => Ok(Molecule::BeH2),
            other => Err(IrError::parameter(
                "molecule",
                format!("unknown molecule '{other}' (expected h2, lih or beh2)"),
            )),
        }
    }
}

/// Resolve excitation indices against `register`, rejecting out-of-range
/// and repeated indices.
fn resolve<const N: usize>(register: &QubitRegister, indices: [usize; N]) -> IrResult<[QubitId; N]> {
    for (k, &i) in indices.iter().enumerate() {
        if indices[..k].contains(&i) {
            return Err(IrError::parameter(
                "excitation",
                format!("orbital {i} appears twice in {indices:?}"),
            ));
        }
    }
    let mut qubits = [QubitId(0); N];
    for (slot, &i) in qubits.iter_mut().zip(&indices) {
        *slot = register.qubit(i)?;
    }
    Ok(qubits)
}

/// Occupy the first `electrons` orbitals.
pub fn append_hartree_fock(
    builder: &mut CircuitBuilder,
    register: &QubitRegister,
    electrons: usize,
) -> IrResult<()> {
    if electrons == 0 {
        return Err(IrError::parameter("electrons", "need at least one electron"));
    }
    if electrons > register.len() {
        return Err(IrError::parameter(
            "electrons",
            format!("{electrons} electrons in {} orbitals", register.len()),
        ));
    }
    for q in register.iter().take(electrons) {
        builder.x(q)?;
    }
    Ok(())
}

/// Rotate amplitude between `occ` and `virt` by `angle`.
pub fn append_single_excitation(
    builder: &mut CircuitBuilder,
    register: &QubitRegister,
    angle: f64,
    occ: usize,
    virt: usize,
) -> IrResult<()> {
    let [occ, virt] = resolve(register, [occ, virt])?;
    builder.conjugate(
        |b| {
            b.cx(occ, virt)?;
            Ok(())
        },
        |b| {
            b.ry(2.0 * angle, occ)?;
            Ok(())
        },
    )?;
    Ok(())
}

/// Double excitation from `(o0, o1)` into `(v0, v1)`.
///
/// A fixed template of ten CX gates and four `Ry(±angle/8)` on `v1`.
pub fn append_double_excitation(
    builder: &mut CircuitBuilder,
    register: &QubitRegister,
    angle: f64,
    indices: (usize, usize, usize, usize),
) -> IrResult<()> {
    let (o0, o1, v0, v1) = indices;
    let [o0, o1, v0, v1] = resolve(register, [o0, o1, v0, v1])?;
    let eighth = angle / 8.0;

    builder.cx(o0, o1)?.cx(o1, v0)?.cx(v0, v1)?;

    builder.ry(eighth, v1)?.cx(o0, v1)?;
    builder.ry(-eighth, v1)?.cx(o1, v1)?;
    builder.ry(eighth, v1)?.cx(o0, v1)?;
    builder.ry(-eighth, v1)?.cx(o1, v1)?;

    builder.cx(v0, v1)?.cx(o1, v0)?.cx(o0, o1)?;
    Ok(())
}

/// Hartree-Fock state followed by every single and double excitation of
/// `molecule`, all at `angle`.
pub fn append_ansatz(
    builder: &mut CircuitBuilder,
    register: &QubitRegister,
    molecule: Molecule,
    angle: f64,
) -> IrResult<()> {
    let spec = molecule.spec();
    append_hartree_fock(builder, register, spec.electrons)?;
    for &(occ, virt) in spec.singles {
        append_single_excitation(builder, register, angle, occ, virt)?;
    }
    for &quad in spec.doubles {
        append_double_excitation(builder, register, angle, quad)?;
    }
    Ok(())
}

/// Build the ansatz circuit for `molecule`.
pub fn ansatz_circuit(molecule: Molecule, angle: f64, measure: bool) -> AlgoResult<Circuit> {
    if !angle.is_finite() {
        return Err(IrError::parameter("angle", "must be finite").into());
    }
    let spec = molecule.spec();
    debug!(
        family = "vqe",
        %molecule,
        num_qubits = spec.num_qubits,
        singles = spec.singles.len(),
        doubles = spec.doubles.len(),
        angle,
        "building ansatz circuit"
    );

    let mut builder = CircuitBuilder::new(format!("vqe_{molecule}"));
    builder.scoped(spec.num_qubits, |b, reg| {
        append_ansatz(b, reg, molecule, angle)?;
        if measure {
            b.measure_register(reg)?;
        }
        Ok(())
    })?;
    Ok(builder.finish()?)
}
