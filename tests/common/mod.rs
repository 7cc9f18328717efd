use assert_cmd::Command;

pub fn nextnote_cmd() -> Command {
    let mut cmd = Command::cargo_bin("nextnote").unwrap();
    cmd.env_remove("NEXTNOTE_ROOT");
    cmd.env_remove("NEXTNOTE_USER");
    cmd
}
