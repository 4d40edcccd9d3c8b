#[cfg(test)]
mod tests {
    use kodegen_bundler_macapp::bundler::{
        Bundle, BundleConfig, ConvertOptions, Error, NativeIcnsConverter, PathResolver,
        SYSTEM_APPLICATIONS_ROOT,
    };
    use std::path::Path;

    fn config(name: &str, base: Option<&Path>, root: bool) -> BundleConfig {
        BundleConfig::builder()
            .name(name)
            .maybe_base_path(base.map(Path::to_path_buf))
            .use_system_root(root)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("x");
        let binary = tmp.path().join("demo-bin");
        let icon = tmp.path().join("demo.icns");
        std::fs::write(&binary, b"#!/bin/sh\necho demo\n").unwrap();
        std::fs::write(&icon, b"icns\0\0\0\x08").unwrap();

        let resolver = PathResolver::new(tmp.path());
        let bundle = Bundle::create_with(&resolver, &config("Demo", Some(&base), false)).await;
        assert_eq!(bundle.path(), base.join("Demo.app"));

        assert_eq!(bundle.place_binary(&binary).await.unwrap(), 20);
        assert_eq!(bundle.place_icon(&icon).await.unwrap(), 8);

        assert_eq!(
            std::fs::read(base.join("Demo.app/Contents/MacOS/Demo")).unwrap(),
            std::fs::read(&binary).unwrap()
        );
        assert_eq!(
            std::fs::read(base.join("Demo.app/Contents/Resources/Demo.icns")).unwrap(),
            std::fs::read(&icon).unwrap()
        );

        let descriptor =
            std::fs::read_to_string(base.join("Demo.app/Contents/info.plist")).unwrap();
        assert!(descriptor.contains("<key>CFBundleDisplayName</key>\n  <string>Demo</string>"));
        assert!(descriptor.contains("<key>CFBundleIconFile</key>\n  <string>Demo</string>"));

        let status = bundle.inspect().await;
        assert!(status.is_complete(), "missing: {:?}", status.missing());
    }

    #[tokio::test]
    async fn test_system_root_ignores_base_path() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let bundle = resolver
            .resolve(&config("Demo", Some(tmp.path()), true))
            .await;

        assert_eq!(
            bundle.path(),
            Path::new(SYSTEM_APPLICATIONS_ROOT).join("Demo.app")
        );
        assert!(!tmp.path().join("Demo.app").exists());
    }

    #[tokio::test]
    async fn test_missing_base_path_uses_working_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = PathResolver::new(tmp.path());
        let bundle = resolver.resolve(&config("Demo", None, false)).await;
        assert_eq!(bundle.path(), tmp.path().join("Demo.app"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unusable_base_path_falls_back_or_fails_strictly() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let cfg = config("Demo", Some(&blocker), false);
        let resolver = PathResolver::new(tmp.path());

        let bundle = resolver.resolve(&cfg).await;
        assert_eq!(bundle.path(), tmp.path().join("Demo.app"));

        let err = resolver.try_resolve(&cfg).await.unwrap_err();
        assert!(matches!(err, Error::DirectoryCreation { .. }));
    }

    #[tokio::test]
    async fn test_folder_operations_are_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = PathResolver::new(tmp.path())
            .resolve(&config("Demo", None, false))
            .await;

        assert!(bundle.ensure_top_level_folder().await);
        assert!(bundle.ensure_top_level_folder().await);

        bundle.ensure_content_structure().await;
        std::fs::write(bundle.descriptor_path(), b"stale").unwrap();
        bundle.ensure_content_structure().await;

        let descriptor = std::fs::read_to_string(bundle.descriptor_path()).unwrap();
        assert!(descriptor.starts_with("<?xml"));
        assert!(bundle.macos_path().is_dir());
        assert!(bundle.resources_path().is_dir());
    }

    #[tokio::test]
    async fn test_directory_source_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle =
            Bundle::create_with(&PathResolver::new(tmp.path()), &config("Demo", None, false))
                .await;
        let dir = tmp.path().join("not-a-file");
        std::fs::create_dir(&dir).unwrap();

        assert!(bundle.place_binary(&dir).await.unwrap_err().is_not_regular_file());
        assert!(bundle.place_icon(&dir).await.unwrap_err().is_not_regular_file());
        assert!(!bundle.binary_path().exists());
        assert!(!bundle.icon_path().exists());
    }

    #[tokio::test]
    async fn test_native_icon_install() {
        let tmp = tempfile::tempdir().unwrap();
        let png = tmp.path().join("icon.png");
        image::RgbaImage::from_pixel(128, 128, image::Rgba([10, 120, 200, 255]))
            .save(&png)
            .unwrap();

        let bundle =
            Bundle::create_with(&PathResolver::new(tmp.path()), &config("Demo", None, false))
                .await;
        bundle
            .install_icon(&NativeIcnsConverter, &png, &ConvertOptions::default())
            .await
            .unwrap();

        let icns = std::fs::read(bundle.icon_path()).unwrap();
        assert_eq!(&icns[..4], b"icns");
    }

    #[tokio::test]
    async fn test_open_existing_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let created =
            Bundle::create_with(&PathResolver::new(tmp.path()), &config("Demo", None, false))
                .await;

        let opened = Bundle::open(created.path()).unwrap();
        assert_eq!(opened, created);

        let err = Bundle::open(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::NotABundle(_)));
    }
}
