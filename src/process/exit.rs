// SPDX-License-Identifier: MPL-2.0

use super::{process_table, ExitCode, Process, ProcessFilter, INIT_PID};
use crate::{
    prelude::*,
    thread::{status::ThreadStatus, thread_table, Thread},
};

/// The exit path of every thread; runs as the thread's last act.
///
/// Publishes the exit value, wakes the joiners, and, when this was the last
/// live thread of the process, carries out the process exit sequence.
pub(crate) fn do_exit(thread: &Arc<Thread>, exit_code: ExitCode) {
    let Some(process) = thread.process() else {
        return;
    };

    if thread.is_main() {
        process.record_exit_code(exit_code);
    }

    // The exit value must be in place before the status flips, so a woken
    // joiner always finds it.
    thread.publish_exit(exit_code);

    // Flipping the status and counting the survivors under the list lock
    // makes "last thread" a decision exactly one exiting thread reaches.
    let is_last_thread = {
        let threads = process.threads().lock();
        thread.set_status(ThreadStatus::Exited);
        threads
            .iter()
            .filter(|other| !other.status().is_exited())
            .count()
            == 0
    };

    thread.exited_queue().wake_all();

    if thread.is_detached() {
        thread_table::remove_thread(thread.tid());
        process.remove_thread(thread.tid());
    }

    if is_last_thread {
        exit_process(&process);
    }
}

/// The process exit sequence of the last exiting thread: orphan adoption,
/// stream release, zombification, and waking the parent.
pub(crate) fn exit_process(process: &Process) {
    debug!("process {} exits", process.pid());

    if process.pid() == INIT_PID {
        // Init reaps every remaining child, adopted orphans included,
        // before it may become a zombie itself.
        while super::wait::wait_child_exit_of(process, ProcessFilter::Any).is_ok() {}
    } else if let Some(init_process) = process_table::get_process(INIT_PID) {
        let mut moved_zombie = false;
        {
            let mut children = process.children().lock();
            let mut init_children = init_process.children().lock();
            while let Some((pid, child)) = children.pop_first() {
                child.set_parent(Arc::downgrade(&init_process));
                moved_zombie |= child.is_zombie();
                init_children.insert(pid, child);
            }
        }
        if moved_zombie {
            init_process.children_queue().wake_all();
        }
    }

    // Drop every stream handle the process still holds; a stream whose last
    // handle goes away releases its storage.
    let closed_files = process.file_table().lock().close_all();
    drop(closed_files);

    // Argument storage and the remaining thread records go with the process.
    process.release_args();
    {
        let mut threads = process.threads().lock();
        for thread in threads.drain(..) {
            thread_table::remove_thread(thread.tid());
        }
    }

    let exit_code = process.recorded_exit_code().unwrap_or(0);
    process.set_zombie(exit_code);

    if let Some(parent) = process.parent() {
        parent.children_queue().wake_all();
    }
}
