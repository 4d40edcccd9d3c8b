#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::path::Path;

    fn macapp(cwd: &Path) -> Command {
        let mut cmd = Command::cargo_bin("kodegen_bundler_macapp").unwrap();
        cmd.current_dir(cwd)
            .env_remove("MACAPP_BASE_PATH")
            .env_remove("MACAPP_CONVERTER");
        cmd
    }

    #[test]
    fn test_create_and_status() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("demo-bin"), b"0123456789").unwrap();
        std::fs::write(tmp.path().join("demo.icns"), b"icns").unwrap();

        macapp(tmp.path())
            .args([
                "create",
                "Demo",
                "--base-path",
                "dist",
                "--binary",
                "demo-bin",
                "--icon",
                "demo.icns",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Placed executable"));

        let app = tmp.path().join("dist/Demo.app");
        assert_eq!(std::fs::read(app.join("Contents/MacOS/Demo")).unwrap(), b"0123456789");
        assert_eq!(std::fs::read(app.join("Contents/Resources/Demo.icns")).unwrap(), b"icns");

        macapp(tmp.path())
            .args(["status", "dist/Demo.app", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"binary_size\": 10"))
            .stdout(predicate::str::contains("\"display_name\": \"Demo\""));
    }

    #[test]
    fn test_status_reports_incomplete_bundle() {
        let tmp = tempfile::tempdir().unwrap();

        macapp(tmp.path()).args(["create", "Demo"]).assert().success();

        macapp(tmp.path())
            .args(["status", "Demo.app"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Contents/MacOS/Demo executable"));
    }

    #[test]
    fn test_create_from_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("conf")).unwrap();
        std::fs::write(tmp.path().join("conf/demo-bin"), b"bin").unwrap();
        std::fs::write(
            tmp.path().join("conf/bundle.toml"),
            "name = \"FromManifest\"\nbase_path = \"out\"\nbinary = \"demo-bin\"\n",
        )
        .unwrap();

        macapp(tmp.path())
            .args(["create", "--manifest", "conf/bundle.toml"])
            .assert()
            .success();

        assert!(
            tmp.path()
                .join("conf/out/FromManifest.app/Contents/MacOS/FromManifest")
                .is_file()
        );
    }

    #[test]
    fn test_native_icon_conversion() {
        let tmp = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 0, 255]))
            .save(tmp.path().join("icon.png"))
            .unwrap();

        macapp(tmp.path())
            .args(["create", "Demo", "--icon", "icon.png", "--converter", "native"])
            .assert()
            .success();

        let icns = std::fs::read(tmp.path().join("Demo.app/Contents/Resources/Demo.icns")).unwrap();
        assert_eq!(&icns[..4], b"icns");
    }

    #[test]
    fn test_default_converter_requires_magick() {
        let tmp = tempfile::tempdir().unwrap();
        let empty_path = tmp.path().join("empty-bin");
        std::fs::create_dir(&empty_path).unwrap();
        image::RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 0, 255]))
            .save(tmp.path().join("icon.png"))
            .unwrap();

        macapp(tmp.path())
            .env("PATH", &empty_path)
            .args(["create", "Demo", "--icon", "icon.png"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("magick not found in PATH"));
        assert!(!tmp.path().join("Demo.app/Contents/Resources/Demo.icns").exists());
    }

    #[test]
    fn test_missing_name_fails() {
        let tmp = tempfile::tempdir().unwrap();

        macapp(tmp.path())
            .arg("create")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Missing required argument: NAME"));
    }

    #[test]
    fn test_invalid_name_fails() {
        let tmp = tempfile::tempdir().unwrap();

        macapp(tmp.path())
            .args(["create", "a/b"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid bundle name"));
        assert!(!tmp.path().join("a").exists());
    }

    #[test]
    fn test_directory_binary_fails() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("bin-dir")).unwrap();

        macapp(tmp.path())
            .args(["create", "Demo", "--binary", "bin-dir"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("is not a regular file"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();

        macapp(tmp.path())
            .args(["create", "Demo", "--convert-timeout", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid arguments"));
        assert!(!tmp.path().join("Demo.app").exists());
    }

    #[test]
    fn test_status_rejects_non_bundle() {
        let tmp = tempfile::tempdir().unwrap();

        macapp(tmp.path())
            .args(["status", "."])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("is not a .app bundle"));
    }
}
