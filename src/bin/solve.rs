//! Binary that takes as standart in a vertex cover instance, decides whether a vertex cover of
//! size at most `k` exists and writes it to standart out, or `infeasible` if there is none.
//! An optional first argument overrides the budget `k` given in the instance.

use std::env;
use std::error;
use std::io::{self, Write};

use log::info;
use lp_cover::vc_instance::VCInstance;

pub fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::init();
    let stdin = io::stdin();
    let stdin = stdin.lock();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let mut instance = VCInstance::read_instance(stdin)?;
    if let Some(k) = env::args().nth(1) {
        instance.k = k.parse()?;
    }
    info!("instance {}: {} nodes, {} edges, k = {}",
          instance.name, instance.graph.num_nodes(), instance.graph.num_edges(), instance.k);

    match instance.solve()? {
        Some(cover) => {
            // Validate
            instance.validate_solution(&cover)?;
            info!("cover of size {}", cover.len());
            VCInstance::write_solution(&cover, &mut stdout)?;
        },
        None => {
            info!("no cover of size at most {}", instance.k);
            writeln!(stdout, "infeasible")?;
        },
    }
    Ok(())
}
