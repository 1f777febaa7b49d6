//! Phased scan pipeline
//!
//! Runs the catalog one category at a time, in phase order:
//!
//! 1. **network-ports** - port discovery, then the port-dependent scans with
//!    the discovered list
//! 2. **network-services** - service enumeration, always attempted
//! 3. **web** / **web-advanced** - only when port discovery found a web port
//!    (or did not run at all)
//! 4. **os-linux** - local enumeration, only when selected
//!
//! Tools run one after another. A failing tool is recorded and the pipeline
//! moves on.

use chrono::Utc;
use recon_tools::{
    ArgSource, CommandLine, TargetContext, ToolCategory, ToolDescriptor, ToolRegistry,
};

use super::executor::{CommandExecutor, Execution};
use super::ports::{join_ports, parse_open_ports};
use super::report::{RunSummary, ToolOutcome, ToolRun};
use crate::config::Settings;
use crate::error::Result;

/// Phases run when none are selected explicitly.
pub const DEFAULT_PHASES: [ToolCategory; 3] = [
    ToolCategory::NetworkPorts,
    ToolCategory::NetworkServices,
    ToolCategory::Web,
];

/// Stand-in for the port list when nothing is executed.
const PORTS_PLACEHOLDER: &str = "<open-ports>";

/// Options for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Categories to run; order and duplicates do not matter
    pub phases: Vec<ToolCategory>,
    /// Record commands without executing them
    pub dry_run: bool,
    /// Binaries known to be absent; their tools are skipped
    pub skip_binaries: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            phases: DEFAULT_PHASES.to_vec(),
            dry_run: false,
            skip_binaries: Vec::new(),
        }
    }
}

impl PipelineOptions {
    /// Select phases (builder pattern). An empty list keeps the defaults.
    pub fn with_phases(mut self, phases: Vec<ToolCategory>) -> Self {
        if !phases.is_empty() {
            self.phases = phases;
        }
        self
    }

    /// Enable or disable dry-run (builder pattern).
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Skip tools whose binary is in `binaries` (builder pattern).
    pub fn skip_binaries(mut self, binaries: Vec<String>) -> Self {
        self.skip_binaries = binaries;
        self
    }

    /// Selected phases, sorted into phase order without duplicates.
    pub fn ordered_phases(&self) -> Vec<ToolCategory> {
        let mut phases = self.phases.clone();
        phases.sort();
        phases.dedup();
        phases
    }
}

/// Outcome of port discovery so far.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PortState {
    NotScanned,
    Found(Vec<u16>),
    NoneFound,
}

/// Callback invoked right before a tool is executed.
pub type StartHook<'a> = Box<dyn Fn(&ToolDescriptor, &CommandLine) + Send + Sync + 'a>;

/// Walks the catalog and runs each selected tool through an executor.
pub struct ScanPipeline<'a, E> {
    registry: &'a ToolRegistry,
    executor: E,
    options: PipelineOptions,
    on_start: Option<StartHook<'a>>,
}

impl<'a, E: CommandExecutor> ScanPipeline<'a, E> {
    pub fn new(registry: &'a ToolRegistry, executor: E, options: PipelineOptions) -> Self {
        Self {
            registry,
            executor,
            options,
            on_start: None,
        }
    }

    /// Call `hook` before each tool is executed (builder pattern).
    ///
    /// Not called in dry-run or for skipped tools.
    pub fn on_tool_start<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ToolDescriptor, &CommandLine) + Send + Sync + 'a,
    {
        self.on_start = Some(Box::new(hook));
        self
    }

    /// The executor commands are sent to.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run every selected phase against the target in `settings`.
    ///
    /// Outside dry-run the resources directory is created first and the
    /// summary is written into it at the end.
    pub async fn run(&self, settings: &Settings) -> Result<RunSummary> {
        let started_at = Utc::now();
        let resources_dir = settings.resources_dir();
        let web_ports = settings.web_ports();
        let dry_run = self.options.dry_run;

        let mut ctx = settings.to_context();
        if dry_run {
            if !ctx.contains(ArgSource::OpenPorts) {
                ctx.set(ArgSource::OpenPorts, PORTS_PLACEHOLDER);
            }
        } else {
            tokio::fs::create_dir_all(&resources_dir).await?;
        }

        tracing::info!(
            target_dir = %resources_dir.display(),
            phases = ?self.options.ordered_phases(),
            dry_run,
            "Starting scan"
        );

        let mut ports = PortState::NotScanned;
        let mut runs = Vec::new();

        for category in self.options.ordered_phases() {
            let gate = phase_gate(category, &ports, &web_ports);
            if let Some(reason) = &gate {
                tracing::warn!(phase = %category, %reason, "Skipping phase");
            }

            for desc in self.registry.by_category(category) {
                if let Some(reason) = self.skip_reason(desc, gate.as_deref(), &ports) {
                    runs.push(skipped(desc, reason));
                    continue;
                }

                let (run, execution) = self.run_tool(desc, &ctx).await;

                // Output is parsed even when the tool exited non-zero.
                if desc.yields_ports && !dry_run {
                    let found = execution
                        .as_ref()
                        .map(|e| parse_open_ports(&e.stdout))
                        .unwrap_or_default();
                    if found.is_empty() {
                        tracing::warn!(tool = %desc.name, "No open ports found");
                        ports = PortState::NoneFound;
                    } else {
                        let list = join_ports(&found);
                        tracing::info!(tool = %desc.name, ports = %list, "Open ports found");
                        ctx.set(ArgSource::OpenPorts, list);
                        ports = PortState::Found(found);
                    }
                }

                runs.push(run);
            }
        }

        let summary = RunSummary {
            target: settings
                .target
                .name
                .clone()
                .unwrap_or_else(|| "recon".to_string()),
            resources_dir: resources_dir.clone(),
            dry_run,
            started_at,
            finished_at: Utc::now(),
            open_ports: match ports {
                PortState::Found(p) => p,
                _ => Vec::new(),
            },
            runs,
        };

        if !dry_run {
            let path = summary.write_to(&resources_dir)?;
            tracing::info!(path = %path.display(), "Wrote run summary");
        }

        Ok(summary)
    }

    /// Why `desc` must not run, if anything prevents it.
    fn skip_reason(
        &self,
        desc: &ToolDescriptor,
        phase_gate: Option<&str>,
        ports: &PortState,
    ) -> Option<String> {
        if let Some(reason) = phase_gate {
            return Some(reason.to_string());
        }
        if desc.needs(ArgSource::OpenPorts) && *ports == PortState::NoneFound {
            return Some("no open ports found".to_string());
        }
        if self.options.skip_binaries.contains(&desc.binary) {
            return Some(format!("{} is not installed", desc.binary));
        }
        if desc.is_privileged() && self.options.skip_binaries.iter().any(|b| b == "sudo") {
            return Some("sudo is not installed".to_string());
        }
        None
    }

    /// Bind and execute one tool.
    async fn run_tool(
        &self,
        desc: &ToolDescriptor,
        ctx: &TargetContext,
    ) -> (ToolRun, Option<Execution>) {
        let started_at = Utc::now();
        let record = |command: Option<&CommandLine>, outcome: ToolOutcome| ToolRun {
            tool: desc.name.clone(),
            category: desc.category,
            command: command.map(ToString::to_string),
            outcome,
            started_at,
            finished_at: Utc::now(),
        };

        let cmd = match desc.bind(ctx) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::warn!(tool = %desc.name, error = %e, "Cannot bind tool");
                return (
                    record(
                        None,
                        ToolOutcome::Skipped {
                            reason: e.to_string(),
                        },
                    ),
                    None,
                );
            }
        };

        if self.options.dry_run {
            return (record(Some(&cmd), ToolOutcome::Planned), None);
        }

        tracing::info!(tool = %desc.name, command = %cmd, "Running tool");
        if let Some(hook) = &self.on_start {
            hook(desc, &cmd);
        }

        match self.executor.execute(&cmd).await {
            Ok(exec) if exec.success() => {
                tracing::info!(tool = %desc.name, "Tool finished");
                (
                    record(Some(&cmd), ToolOutcome::Completed { exit_code: 0 }),
                    Some(exec),
                )
            }
            Ok(exec) => {
                let message = exec
                    .stderr_tail()
                    .unwrap_or("exited with non-zero status")
                    .to_string();
                tracing::error!(
                    tool = %desc.name,
                    exit_code = ?exec.exit_code,
                    %message,
                    "Tool failed"
                );
                let outcome = ToolOutcome::Failed {
                    exit_code: exec.exit_code,
                    message,
                };
                (record(Some(&cmd), outcome), Some(exec))
            }
            Err(e) => {
                tracing::error!(tool = %desc.name, error = %e, "Tool failed to start");
                let outcome = ToolOutcome::Failed {
                    exit_code: None,
                    message: e.to_string(),
                };
                (record(Some(&cmd), outcome), None)
            }
        }
    }
}

/// Reason to skip a whole phase given what port discovery found.
fn phase_gate(category: ToolCategory, ports: &PortState, web_ports: &[u16]) -> Option<String> {
    if !category.is_web() {
        return None;
    }
    match ports {
        PortState::NotScanned => None,
        PortState::NoneFound => Some("no open ports found".to_string()),
        PortState::Found(open) if open.iter().any(|p| web_ports.contains(p)) => None,
        PortState::Found(_) => Some(format!(
            "no web port open (looked for {})",
            join_ports(web_ports)
        )),
    }
}

fn skipped(desc: &ToolDescriptor, reason: String) -> ToolRun {
    let now = Utc::now();
    ToolRun {
        tool: desc.name.clone(),
        category: desc.category,
        command: None,
        outcome: ToolOutcome::Skipped { reason },
        started_at: now,
        finished_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runner::report::SUMMARY_FILE;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every command and answers from canned outputs keyed by
    /// program name; unknown programs succeed with empty output.
    #[derive(Default)]
    struct FakeExecutor {
        responses: HashMap<String, Execution>,
        unstartable: Vec<String>,
        calls: Mutex<Vec<CommandLine>>,
    }

    impl FakeExecutor {
        fn respond(mut self, program: &str, exit_code: i32, stdout: &str, stderr: &str) -> Self {
            self.responses.insert(
                program.to_string(),
                Execution {
                    exit_code: Some(exit_code),
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
            );
            self
        }

        fn called(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.program.clone())
                .collect()
        }

        fn call_for(&self, program: &str) -> Option<CommandLine> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.program == program)
                .cloned()
        }
    }

    #[async_trait]
    impl CommandExecutor for FakeExecutor {
        async fn execute(&self, cmd: &CommandLine) -> Result<Execution> {
            self.calls.lock().unwrap().push(cmd.clone());
            if self.unstartable.contains(&cmd.program) {
                return Err(Error::Spawn {
                    program: cmd.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                });
            }
            Ok(self
                .responses
                .get(&cmd.program)
                .cloned()
                .unwrap_or(Execution {
                    exit_code: Some(0),
                    ..Default::default()
                }))
        }
    }

    fn settings(root: &std::path::Path) -> Settings {
        let mut settings = Settings::parse(
            r#"
[target]
platform = "htb"
name = "box"
source_ip = "10.0.0.2"
ip = "10.0.0.5"
url = "http://box.htb"
domain = "box.htb"

[wordlists]
dns = "dns.txt"
dir = "dir.txt"

[users]
current = "kali"
os = "www-data"
"#,
        )
        .unwrap();
        settings.output.root = Some(root.to_path_buf());
        settings
    }

    async fn run(
        executor: FakeExecutor,
        options: PipelineOptions,
        settings: &Settings,
    ) -> (RunSummary, FakeExecutor) {
        let registry = ToolRegistry::with_builtins();
        let pipeline = ScanPipeline::new(&registry, executor, options);
        let summary = pipeline.run(settings).await.unwrap();
        (summary, pipeline.executor)
    }

    fn outcome<'s>(summary: &'s RunSummary, tool: &str) -> &'s ToolOutcome {
        &summary
            .run(tool)
            .unwrap_or_else(|| panic!("no record for {}", tool))
            .outcome
    }

    #[tokio::test]
    async fn test_default_run_with_web_port() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let executor = FakeExecutor::default().respond("rustscan", 0, "10.0.0.5 -> [22,80]\n", "");

        let (summary, executor) = run(executor, PipelineOptions::default(), &settings).await;

        assert_eq!(summary.open_ports, vec![22, 80]);
        assert_eq!(
            executor.called(),
            vec![
                "rustscan",
                "nmap",
                "enum4linux-ng",
                "smbclient",
                "feroxbuster",
                "hakrawler",
                "ffuf",
                "ffuf",
                "wafw00f",
                "whatweb",
                "nikto"
            ]
        );
        let nmap = executor.call_for("nmap").unwrap();
        assert!(nmap.args.contains(&"-p22,80".to_string()));
        assert!(nmap.privileged);

        assert_eq!(summary.tally().completed, 11);
        assert!(settings.resources_dir().join(SUMMARY_FILE).is_file());
    }

    #[tokio::test]
    async fn test_web_phase_skipped_without_web_port() {
        let temp = TempDir::new().unwrap();
        let executor = FakeExecutor::default().respond("rustscan", 0, "10.0.0.5 -> [22]\n", "");

        let (summary, executor) =
            run(executor, PipelineOptions::default(), &settings(temp.path())).await;

        assert!(executor.call_for("nmap").is_some());
        assert!(executor.call_for("feroxbuster").is_none());
        match outcome(&summary, "nikto") {
            ToolOutcome::Skipped { reason } => assert!(reason.contains("no web port")),
            other => panic!("Expected Skipped, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_ports_skips_nmap_and_web_but_not_services() {
        let temp = TempDir::new().unwrap();
        let executor = FakeExecutor::default().respond("rustscan", 0, "", "");

        let (summary, executor) =
            run(executor, PipelineOptions::default(), &settings(temp.path())).await;

        assert_eq!(
            executor.called(),
            vec!["rustscan", "enum4linux-ng", "smbclient"]
        );
        assert_eq!(
            outcome(&summary, "nmap"),
            &ToolOutcome::Skipped {
                reason: "no open ports found".into()
            }
        );
        assert!(summary.open_ports.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_recorded_and_run_continues() {
        let temp = TempDir::new().unwrap();
        let mut executor = FakeExecutor::default()
            .respond("rustscan", 0, "10.0.0.5 -> [443]", "")
            .respond("whatweb", 2, "", "ERROR: connection refused\n");
        executor.unstartable.push("wafw00f".into());

        let (summary, executor) =
            run(executor, PipelineOptions::default(), &settings(temp.path())).await;

        assert_eq!(
            outcome(&summary, "whatweb"),
            &ToolOutcome::Failed {
                exit_code: Some(2),
                message: "ERROR: connection refused".into()
            }
        );
        assert!(matches!(
            outcome(&summary, "wafw00f"),
            ToolOutcome::Failed { exit_code: None, .. }
        ));
        assert!(executor.call_for("nikto").is_some());
        assert!(summary.has_failures());
    }

    #[tokio::test]
    async fn test_dry_run_executes_nothing() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let options = PipelineOptions::default()
            .with_phases(ToolCategory::ALL.to_vec())
            .dry_run(true);

        let (summary, executor) = run(FakeExecutor::default(), options, &settings).await;

        assert!(executor.called().is_empty());
        assert_eq!(summary.tally().planned, recon_tools::BUILTIN_COUNT);
        assert!(!settings.resources_dir().exists());

        let nmap = summary.run("nmap").unwrap();
        assert!(nmap.command.as_deref().unwrap().contains(PORTS_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_missing_value_skips_tool() {
        let temp = TempDir::new().unwrap();
        let mut settings = settings(temp.path());
        settings.wordlists.dir = None;
        let options = PipelineOptions::default().with_phases(vec![ToolCategory::Web]);

        let (summary, executor) = run(FakeExecutor::default(), options, &settings).await;

        match outcome(&summary, "feroxbuster") {
            ToolOutcome::Skipped { reason } => assert!(reason.contains("fuzzwordlistdir")),
            other => panic!("Expected Skipped, got {:?}", other),
        }
        // Without port discovery the web phase is not gated.
        assert!(executor.call_for("nikto").is_some());
    }

    #[tokio::test]
    async fn test_skip_binaries() {
        let temp = TempDir::new().unwrap();
        let options = PipelineOptions::default()
            .with_phases(vec![ToolCategory::NetworkServices])
            .skip_binaries(vec!["smbclient".into()]);

        let (summary, executor) =
            run(FakeExecutor::default(), options, &settings(temp.path())).await;

        assert_eq!(executor.called(), vec!["enum4linux-ng"]);
        assert_eq!(
            outcome(&summary, "smbclient"),
            &ToolOutcome::Skipped {
                reason: "smbclient is not installed".into()
            }
        );
    }

    #[tokio::test]
    async fn test_failed_port_discovery_output_is_still_used() {
        let temp = TempDir::new().unwrap();
        let executor = FakeExecutor::default().respond(
            "rustscan",
            1,
            "10.0.0.5 -> [22,8080]\n",
            "warning: ulimit too low\n",
        );

        let (summary, executor) =
            run(executor, PipelineOptions::default(), &settings(temp.path())).await;

        assert!(matches!(
            outcome(&summary, "rustscan"),
            ToolOutcome::Failed {
                exit_code: Some(1),
                ..
            }
        ));
        assert_eq!(summary.open_ports, vec![22, 8080]);
        let nmap = executor.call_for("nmap").unwrap();
        assert!(nmap.args.contains(&"-p22,8080".to_string()));
        assert!(executor.call_for("nikto").is_some());
    }

    #[tokio::test]
    async fn test_missing_sudo_skips_privileged_tools() {
        let temp = TempDir::new().unwrap();
        let executor = FakeExecutor::default().respond("rustscan", 0, "10.0.0.5 -> [22]", "");
        let options = PipelineOptions::default()
            .with_phases(vec![ToolCategory::NetworkPorts])
            .skip_binaries(vec!["sudo".into()]);

        let (summary, executor) = run(executor, options, &settings(temp.path())).await;

        assert_eq!(executor.called(), vec!["rustscan"]);
        assert_eq!(
            outcome(&summary, "nmap"),
            &ToolOutcome::Skipped {
                reason: "sudo is not installed".into()
            }
        );
    }

    #[tokio::test]
    async fn test_start_hook_sees_each_executed_tool() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let registry = ToolRegistry::with_builtins();
        let started = Mutex::new(Vec::new());
        let options = PipelineOptions::default()
            .with_phases(vec![ToolCategory::NetworkServices])
            .skip_binaries(vec!["smbclient".into()]);

        let pipeline = ScanPipeline::new(&registry, FakeExecutor::default(), options)
            .on_tool_start(|desc, cmd| {
                started
                    .lock()
                    .unwrap()
                    .push(format!("{} {}", desc.name, cmd.program));
            });
        pipeline.run(&settings).await.unwrap();
        drop(pipeline);

        assert_eq!(started.into_inner().unwrap(), vec!["enum4linux-ng enum4linux-ng"]);
    }

    #[test]
    fn test_ordered_phases() {
        let options = PipelineOptions::default().with_phases(vec![
            ToolCategory::Web,
            ToolCategory::NetworkPorts,
            ToolCategory::Web,
        ]);
        assert_eq!(
            options.ordered_phases(),
            vec![ToolCategory::NetworkPorts, ToolCategory::Web]
        );
        assert_eq!(
            PipelineOptions::default().with_phases(vec![]).phases,
            DEFAULT_PHASES.to_vec()
        );
    }

    #[test]
    fn test_phase_gate() {
        let web = [80, 443];
        assert_eq!(phase_gate(ToolCategory::NetworkServices, &PortState::NoneFound, &web), None);
        assert_eq!(phase_gate(ToolCategory::Web, &PortState::NotScanned, &web), None);
        assert_eq!(
            phase_gate(ToolCategory::WebAdvanced, &PortState::Found(vec![22, 443]), &web),
            None
        );
        assert_eq!(
            phase_gate(ToolCategory::Web, &PortState::Found(vec![22]), &web),
            Some("no web port open (looked for 80,443)".to_string())
        );
    }
}
