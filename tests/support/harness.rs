use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables stackgate reads from the environment; cleared for every run so
/// the developer's shell cannot leak into a test.
const INHERITED_VARS: [&str; 7] = [
    "DEPLOY_MODE",
    "PARTICIPANT_PREFIX",
    "CDK_DEFAULT_REGION",
    "STACKGATE_AWS_CLI",
    "STACKGATE_CDK_CLI",
    "STACKGATE_QUIET",
    "STACKGATE_LOG",
];

/// TestHarness provides an isolated working directory for running the
/// stackgate binary, with optional fake `aws` and `cdk` executables.
pub struct TestHarness {
    pub dir: TempDir,
    pub stackgate_binary: PathBuf,
    aws_cli: Option<PathBuf>,
    cdk_cli: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl TestHarness {
    /// Creates a harness whose AWS CLI does not exist, so any registry query
    /// fails loudly.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            stackgate_binary: PathBuf::from(env!("CARGO_BIN_EXE_stackgate")),
            aws_cli: None,
            cdk_cli: None,
            env: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Sets an environment variable for every subsequent run.
    #[allow(dead_code)]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Writes `cdk.json` into the working directory.
    #[allow(dead_code)]
    pub fn with_cdk_json(self, content: &str) -> Self {
        fs::write(self.path().join("cdk.json"), content).expect("Failed to write cdk.json");
        self
    }

    /// Installs a fake AWS CLI backed by `registry`.
    #[allow(dead_code)]
    pub fn with_registry(mut self, registry: &FakeRegistry) -> Self {
        let path = self.path().join("fake-aws");
        write_script(&path, &registry.script(&self.path().join("aws-calls.log")));
        self.aws_cli = Some(path);
        self
    }

    /// Installs a fake cdk that records its arguments and environment and
    /// exits with `code`.
    #[allow(dead_code)]
    pub fn with_fake_cdk(mut self, code: i32) -> Self {
        let path = self.path().join("fake-cdk");
        let log = self.path().join("cdk-calls.log");
        let script = format!(
            "#!/bin/sh\n\
             echo \"args: $*\" >> '{log}'\n\
             echo \"DEPLOY_MODE=$DEPLOY_MODE\" >> '{log}'\n\
             echo \"PARTICIPANT_PREFIX=$PARTICIPANT_PREFIX\" >> '{log}'\n\
             echo \"CDK_DEFAULT_REGION=$CDK_DEFAULT_REGION\" >> '{log}'\n\
             exit {code}\n",
            log = log.display(),
            code = code,
        );
        write_script(&path, &script);
        self.cdk_cli = Some(path);
        self
    }

    /// Runs stackgate in the harness directory.
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(&self.stackgate_binary);
        cmd.args(args).current_dir(self.path()).env("NO_COLOR", "1");

        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }

        let aws = self
            .aws_cli
            .clone()
            .unwrap_or_else(|| self.path().join("no-such-aws"));
        cmd.env("STACKGATE_AWS_CLI", aws);
        if let Some(cdk) = &self.cdk_cli {
            cmd.env("STACKGATE_CDK_CLI", cdk);
        }

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd.output().expect("Failed to run stackgate")
    }

    /// Lines the fake AWS CLI logged, one per call.
    #[allow(dead_code)]
    pub fn aws_calls(&self) -> Vec<String> {
        read_lines(&self.path().join("aws-calls.log"))
    }

    /// Lines the fake cdk logged.
    #[allow(dead_code)]
    pub fn cdk_calls(&self) -> Vec<String> {
        read_lines(&self.path().join("cdk-calls.log"))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry contents served by the fake AWS CLI.
#[derive(Default)]
pub struct FakeRegistry {
    units: Vec<(String, String)>,
    exports: Vec<String>,
    failure: Option<String>,
}

#[allow(dead_code)]
impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(mut self, name: &str, status: &str) -> Self {
        self.units.push((name.to_string(), status.to_string()));
        self
    }

    pub fn exports(mut self, names: &[String]) -> Self {
        self.exports.extend(names.iter().cloned());
        self
    }

    pub fn export(mut self, name: &str) -> Self {
        self.exports.push(name.to_string());
        self
    }

    /// Every call fails with `stderr` and a non-zero exit.
    pub fn failing(mut self, stderr: &str) -> Self {
        self.failure = Some(stderr.to_string());
        self
    }

    fn script(&self, log: &Path) -> String {
        let mut script = format!("#!/bin/sh\necho \"$*\" >> '{}'\n", log.display());

        if let Some(stderr) = &self.failure {
            script.push_str(&format!("echo '{}' >&2\nexit 255\n", stderr));
            return script;
        }

        // $1=cloudformation $2=<operation> $3=--stack-name $4=<name>
        script.push_str("case \"$2\" in\n  describe-stacks)\n    case \"$4\" in\n");
        for (name, status) in &self.units {
            script.push_str(&format!(
                "      {name}) echo '{{\"Stacks\":[{{\"StackName\":\"{name}\",\"StackStatus\":\"{status}\"}}]}}' ;;\n",
                name = name,
                status = status,
            ));
        }
        script.push_str(
            "      *) echo \"An error occurred (ValidationError) when calling the DescribeStacks operation: Stack with id $4 does not exist\" >&2; exit 254 ;;\n    esac ;;\n",
        );

        let exports: Vec<String> = self
            .exports
            .iter()
            .map(|name| format!("{{\"Name\":\"{}\",\"Value\":\"x\"}}", name))
            .collect();
        script.push_str(&format!(
            "  list-exports) echo '{{\"Exports\":[{}]}}' ;;\n  *) exit 2 ;;\nesac\n",
            exports.join(",")
        ));

        script
    }
}

fn write_script(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).expect("stat script").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).expect("chmod script");
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|s| s.lines().map(String::from).collect())
        .unwrap_or_default()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
