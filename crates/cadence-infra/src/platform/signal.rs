// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use cadence_core::RunState;
use std::thread::JoinHandle;

/// Watches for Ctrl-C on a helper thread and requests a stop when it
/// arrives. The main loop notices on its next iteration.
pub fn spawn_interrupt_watcher(run_state: RunState) -> Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let handle = std::thread::Builder::new()
        .name("interrupt-watcher".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        log::info!("Interrupt received, stopping.");
                        run_state.request_stop();
                    }
                    Err(e) => log::error!("Unable to listen for the interrupt signal: {e}"),
                }
            });
        })?;
    Ok(handle)
}
