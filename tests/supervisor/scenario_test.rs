/*!
 * Supervisor Scenario Tests
 * Admission, termination and the documented release hazards
 */

use devos_kernel::{
    KernelConfig, KernelError, MemoryError, Process, ProcessError, ProcessState, ReleasePolicy,
    ResourceSupervisor,
};
use pretty_assertions::assert_eq;

fn supervisor(total: usize, quota: usize) -> ResourceSupervisor {
    ResourceSupervisor::with_capacity(total, quota).unwrap()
}

fn permissive(total: usize, quota: usize) -> ResourceSupervisor {
    let config = KernelConfig::default()
        .with_total_memory(total)
        .with_quota(quota)
        .with_release_policy(ReleasePolicy::Permissive);
    ResourceSupervisor::new(&config).unwrap()
}

#[test]
fn test_admit_and_terminate_sequence() {
    let sup = supervisor(4096, 1024);

    assert_eq!(sup.admit(Process::new(1, "P1")).unwrap(), 1);
    assert_eq!(sup.free_memory(), 3072);

    assert_eq!(sup.admit(Process::new(2, "P2")).unwrap(), 2);
    assert_eq!(sup.free_memory(), 2048);

    let p1 = sup.terminate(1).unwrap();
    assert_eq!(p1.state(), ProcessState::Terminated);
    assert_eq!(p1.name(), "P1");
    assert_eq!(sup.free_memory(), 3072);
    assert!(!sup.is_running(1));

    assert_eq!(sup.admit(Process::new(3, "P3")).unwrap(), 3);
    assert_eq!(sup.free_memory(), 2048);

    let running: Vec<_> = sup.list_processes().iter().map(|p| p.pid()).collect();
    assert_eq!(running, vec![2, 3]);
    assert!(sup
        .list_processes()
        .iter()
        .all(|p| p.state() == ProcessState::Running));
}

#[test]
fn test_rejection_when_memory_exhausted() {
    let sup = supervisor(1024, 1024);

    sup.admit(Process::new(1, "P1")).unwrap();
    assert_eq!(sup.free_memory(), 0);

    let err = sup.admit(Process::new(2, "P2")).unwrap_err();
    assert_eq!(
        err,
        KernelError::Memory(MemoryError::InsufficientMemory {
            requested: 1024,
            free: 0,
            total: 1024,
        })
    );
    assert_eq!(sup.free_memory(), 0);
    assert!(!sup.is_running(2));
    assert_eq!(sup.running_count(), 1);
}

#[test]
fn test_full_pool_rejects_until_terminate() {
    let sup = supervisor(2048, 1024);
    sup.admit(Process::new(1, "a")).unwrap();
    sup.admit(Process::new(2, "b")).unwrap();

    for pid in 3..10 {
        assert!(sup
            .admit(Process::new(pid, "late"))
            .unwrap_err()
            .is_insufficient_memory());
    }
    assert_eq!(sup.free_memory(), 0);

    sup.terminate(2).unwrap();
    assert_eq!(sup.admit(Process::new(10, "after")).unwrap(), 10);
    assert_eq!(sup.free_memory(), 0);
}

#[test]
fn test_terminate_twice_fails_with_unknown_process() {
    let sup = supervisor(4096, 1024);
    sup.admit(Process::new(1, "P1")).unwrap();
    sup.terminate(1).unwrap();
    let free_after_first = sup.free_memory();

    let err = sup.terminate(1).unwrap_err();
    assert_eq!(err, KernelError::Process(ProcessError::UnknownProcess(1)));
    assert_eq!(sup.free_memory(), free_after_first);
    assert_eq!(free_after_first, 4096);
}

#[test]
fn test_terminate_never_admitted_strict() {
    let sup = supervisor(4096, 1024);
    sup.admit(Process::new(1, "P1")).unwrap();

    let err = sup.terminate(99).unwrap_err();
    assert!(err.is_unknown_process());
    // Guarded policy: nothing was credited
    assert_eq!(sup.free_memory(), 3072);
}

#[test]
fn test_terminate_never_admitted_permissive() {
    let sup = permissive(4096, 1024);
    sup.admit(Process::new(1, "P1")).unwrap();

    let err = sup.terminate(99).unwrap_err();
    assert!(err.is_unknown_process());
    // Release runs before the registry check
    assert_eq!(sup.free_memory(), 4096);

    let err = sup.terminate(99).unwrap_err();
    assert!(err.is_unknown_process());
    assert_eq!(sup.free_memory(), 5120);
    assert!(sup.free_memory() > sup.total_memory());
}

#[test]
fn test_terminate_never_admitted_clamp() {
    let config = KernelConfig::default()
        .with_total_memory(4096)
        .with_quota(1024)
        .with_release_policy(ReleasePolicy::Clamp);
    let sup = ResourceSupervisor::new(&config).unwrap();
    sup.admit(Process::new(1, "P1")).unwrap();

    let err = sup.terminate(99).unwrap_err();
    assert!(err.is_unknown_process());
    assert_eq!(sup.free_memory(), 3072);

    sup.terminate(1).unwrap();
    assert_eq!(sup.free_memory(), 4096);

    let err = sup.terminate(1).unwrap_err();
    assert!(err.is_unknown_process());
    assert_eq!(sup.free_memory(), 4096);
}

#[test]
fn test_duplicate_pid_leaves_memory_untouched() {
    let sup = supervisor(4096, 1024);
    sup.admit(Process::new(7, "first")).unwrap();

    let err = sup.admit(Process::new(7, "second")).unwrap_err();
    assert!(err.is_duplicate_process());
    assert_eq!(sup.free_memory(), 3072);
    assert_eq!(sup.lookup(7).unwrap().name(), "first");
}

#[test]
fn test_invalid_processes_rejected() {
    let sup = supervisor(4096, 1024);

    assert!(matches!(
        sup.admit(Process::new(0, "zero")),
        Err(KernelError::Process(ProcessError::InvalidProcess(_)))
    ));
    assert!(matches!(
        sup.admit(Process::new(1, "")),
        Err(KernelError::Process(ProcessError::InvalidProcess(_)))
    ));
    assert_eq!(sup.free_memory(), 4096);
}

#[test]
fn test_terminated_process_cannot_be_readmitted() {
    let sup = supervisor(4096, 1024);
    sup.admit(Process::new(1, "P1")).unwrap();
    let terminated = sup.terminate(1).unwrap();

    assert!(matches!(
        sup.admit(terminated),
        Err(KernelError::Process(ProcessError::InvalidStateTransition { .. }))
    ));
    assert_eq!(sup.free_memory(), 4096);
}

#[test]
fn test_spawn_assigns_pids() {
    let sup = supervisor(4096, 1024);
    sup.admit(Process::new(1, "manual")).unwrap();

    let pid = sup.spawn("auto").unwrap();
    assert_eq!(pid, 2);
    assert_eq!(sup.lookup(pid).unwrap().name(), "auto");
    assert!(sup.spawn("").is_err());
}

#[test]
fn test_rejected_spawn_keeps_pid_free() {
    let sup = supervisor(1024, 1024);
    assert_eq!(sup.spawn("a").unwrap(), 1);

    let err = sup.spawn("b").unwrap_err();
    assert!(err.is_insufficient_memory());

    sup.terminate(1).unwrap();
    assert_eq!(sup.spawn("c").unwrap(), 2);
}

#[test]
fn test_events_and_stats() {
    let sup = supervisor(1024, 1024);
    sup.admit(Process::new(1, "Process 1")).unwrap();
    let _ = sup.admit(Process::new(2, "Process 2"));
    sup.terminate(1).unwrap();

    assert_eq!(
        sup.collector().status_lines(),
        vec![
            "Running process: Process 1".to_string(),
            "Unable to run process: Process 2 (insufficient memory)".to_string(),
            "Terminated process: Process 1".to_string(),
        ]
    );

    let stats = sup.stats();
    assert_eq!(stats.running_processes, 0);
    assert_eq!(stats.events.admitted, 1);
    assert_eq!(stats.events.rejected, 1);
    assert_eq!(stats.events.terminated, 1);
    assert_eq!(stats.memory.free_memory, 1024);
    assert_eq!(stats.admission_headroom(), 1);
}

#[test]
fn test_clones_share_state() {
    let sup = supervisor(4096, 1024);
    let other = sup.clone();

    sup.admit(Process::new(1, "shared")).unwrap();
    assert!(other.is_running(1));
    assert_eq!(other.free_memory(), 3072);
}

#[test]
fn test_build_from_config() {
    let config = KernelConfig::default()
        .with_total_memory(2048)
        .with_quota(512)
        .with_storage_root("/var/lib/devos")
        .with_event_history(4);
    let sup = ResourceSupervisor::try_from(config).unwrap();

    assert_eq!(sup.total_memory(), 2048);
    assert_eq!(sup.quota(), 512);
    assert_eq!(sup.collector().capacity(), 4);

    for _ in 0..4 {
        sup.spawn("worker").unwrap();
    }
    sup.terminate(1).unwrap();
    assert_eq!(sup.collector().len(), 4);
    assert_eq!(sup.stats().admission_headroom(), 1);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(matches!(
        ResourceSupervisor::with_capacity(0, 1024),
        Err(KernelError::Config(_))
    ));
    assert!(matches!(
        ResourceSupervisor::with_capacity(512, 1024),
        Err(KernelError::Config(_))
    ));
}
