// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use crcfold_constants::GeneratorPreset;

pub fn execute() -> Result<()> {
    print!("{}", render());
    Ok(())
}

pub fn render() -> String {
    let mut out = format!(
        "{:<12} {:>5}  {:<18}  {:<18}\n",
        "NAME", "WIDTH", "NORMAL", "REFLECTED"
    );
    for preset in GeneratorPreset::ALL {
        let metadata = preset.metadata();
        let digits = metadata.width.div_ceil(4) as usize;
        out.push_str(&format!(
            "{:<12} {:>5}  {:<18}  {:<18}\n",
            metadata.name,
            metadata.width,
            format!("0x{:0digits$x}", metadata.normal),
            format!("0x{:0digits$x}", metadata.reflected),
        ));
    }
    out
}
