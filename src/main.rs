/*!
 * DevOS - Main Entry Point
 *
 * Builds the resource supervisor and blob store from configuration, then
 * runs a short admission/termination sequence and a storage round trip.
 */

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

use devos_kernel::core::config::ENV_CONFIG;
use devos_kernel::{
    init_tracing, BlobStore, KernelConfig, KernelError, LocalStore, Process, ResourceSupervisor,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = std::env::var(ENV_CONFIG).ok().map(PathBuf::from);
    let config = KernelConfig::load(config_path.as_deref())?;

    info!("DevOS starting...");
    let supervisor = ResourceSupervisor::new(&config)?;

    let store = LocalStore::create(&config.storage_root)
        .with_context(|| format!("opening storage at {}", config.storage_root.display()))?;

    let process1 = Process::new(1, "Process 1");
    let process2 = Process::new(2, "Process 2");

    run(&supervisor, process1);
    run(&supervisor, process2);

    match supervisor.terminate(1) {
        Ok(process) => println!("Terminated process: {}", process.name()),
        Err(e) => println!("Unable to terminate PID 1: {}", e),
    }

    let path = Path::new("example.txt");
    store.put_text(path, "This is an example file.")?;
    let content = store.get_text(path)?;
    println!("File content: {}", content);

    let stats = supervisor.stats();
    info!(
        running = stats.running_processes,
        free = stats.memory.free_memory,
        total = stats.memory.total_memory,
        "DevOS finished"
    );
    Ok(())
}

fn run(supervisor: &ResourceSupervisor, process: Process) {
    let name = process.name().to_string();
    match supervisor.admit(process) {
        Ok(_) => println!("Running process: {}", name),
        Err(e) if e.is_insufficient_memory() => {
            println!("Unable to run process: {} (insufficient memory)", name)
        }
        Err(e) => println!("Unable to run process: {} ({})", name, describe(&e)),
    }
}

fn describe(err: &KernelError) -> String {
    match err {
        KernelError::Process(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
