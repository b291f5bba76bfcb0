use crate::error::{CompressorError, Result};
use crate::instruction::{HeaderFlags, Instruction, Plan, MAX_LITERAL, MAX_ZERO_RUN, PADDED_WORD, SHORT_SLOT_LIMIT};
use crate::dictionary::MAX_SLOT;
use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

/// Emit the byte stream for `plan`, which must describe `data`.
///
/// Every field is written at its fixed width. Nothing is returned if any
/// instruction cannot be encoded.
pub fn serialize(plan: &Plan, data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(plan.compressed_size() + plan.len());
    for instruction in plan.instructions() {
        if instruction.end() > data.len() {
            return Err(CompressorError::InvalidPlan(format!(
                "{:?} reaches past the {}-byte input",
                instruction,
                data.len()
            )));
        }
        write_instruction(&mut output, instruction, data)?;
    }
    Ok(output)
}

pub fn write_instruction<W: Write>(writer: &mut W, instruction: &Instruction, data: &[u8]) -> Result<()> {
    match *instruction {
        Instruction::ZeroRun { start, length } => {
            if length == 0 || length > MAX_ZERO_RUN {
                return Err(CompressorError::InvalidPlan(format!("zero run of {} bytes", length)));
            }
            if data[start..start + length].iter().any(|&b| b != 0) {
                return Err(CompressorError::InvalidPlan(format!("zero run at {} covers non-zero bytes", start)));
            }
            writer.write_u8((length - 1) as u8)?;
        }
        Instruction::Literal { start, length, skip } => {
            if length == 0 || length > MAX_LITERAL || skip >= length {
                return Err(CompressorError::InvalidPlan(format!(
                    "literal of {} bytes skipping {}",
                    length, skip
                )));
            }
            if skip > 0 && length != PADDED_WORD {
                return Err(CompressorError::InvalidPlan(format!(
                    "literal at {} skips zeros but is not a {}-byte word",
                    start, PADDED_WORD
                )));
            }
            if data[start..start + skip].iter().any(|&b| b != 0) {
                return Err(CompressorError::InvalidPlan(format!("literal at {} skips non-zero bytes", start)));
            }

            let mut header = HeaderFlags::COPY;
            if skip > 0 {
                header |= HeaderFlags::SKIP_ZEROS;
            }
            writer.write_u8(header.bits() | (length - skip - 1) as u8)?;
            writer.write_all(&data[start + skip..start + length])?;
        }
        Instruction::DictRef { length, slot, .. } => {
            let selector = length.selector() as u32;
            if slot < SHORT_SLOT_LIMIT {
                let prefix = (HeaderFlags::DICTIONARY.bits() as u32) << 8;
                writer.write_u16::<BigEndian>((prefix | selector << 12 | slot) as u16)?;
            } else if slot <= MAX_SLOT {
                let prefix = ((HeaderFlags::DICTIONARY | HeaderFlags::COPY).bits() as u32) << 16;
                writer.write_u24::<BigEndian>(prefix | selector << 20 | slot)?;
            } else {
                return Err(CompressorError::InvalidPlan(format!("slot {} does not fit in 20 bits", slot)));
            }
        }
    }
    Ok(())
}
