//! Lockfiles and project layouts shared by tests.

use crate::fs::write_file;
use std::path::Path;
use text_block_macros::text_block_fnl;

/// Lockfile of a single project, written by pnpm 7.
pub const SINGLE_PROJECT_LOCKFILE: &str = text_block_fnl! {
    "lockfileVersion: 5.4"
    ""
    "specifiers:"
    "  '@types/react': ^18.0.0"
    "  lodash: ^4.17.0"
    "  react: ^18.0.0"
    "  react-redux: ^8.0.0"
    ""
    "dependencies:"
    "  lodash: 4.17.21"
    "  react: 18.2.0"
    "  react-redux: 8.0.5_react@18.2.0"
    ""
    "devDependencies:"
    "  '@types/react': 18.0.28"
    ""
    "packages:"
    ""
    "  /@types/prop-types/15.7.5:"
    "    resolution: {integrity: sha512-JCB8C6SnDoQf0cNycqd/35A7MjcnK+ZTqE7judS6o7utxUCg6imJg3QK2qzHKszlTjcj2cn+NwMB2i96ubpj7w==}"
    "    dev: true"
    ""
    "  /@types/react/18.0.28:"
    "    resolution: {integrity: sha512-RD0ivG1kEztNBdoAK7lekI9M+azSnitIn85h4iOiaLjaTrMjzslhaqCGaI4IyCJ1RljWiLCEu4jyrLLgqxBTew==}"
    "    dependencies:"
    "      '@types/prop-types': 15.7.5"
    "    dev: true"
    ""
    "  /js-tokens/4.0.0:"
    "    resolution: {integrity: sha512-RdJUflcE3cUzKiMqQgsCu06FPu9UdIJO0beYbPhHN4k6apgJtifcoCtT9bcxOpYBtpD2kCM6Sbzg4CausW/PKQ==}"
    "    dev: false"
    ""
    "  /lodash/4.17.21:"
    "    resolution: {integrity: sha512-v2kDEe57lecTulaDIuNTPy3Ry4gLGJ6Z1O3vE1krgXZNrsQ+LFTGHVxVjcXPs17LhbZVGedAJv8XZ1tvj5FvSg==}"
    "    dev: false"
    ""
    "  /loose-envify/1.4.0:"
    "    resolution: {integrity: sha512-lyuxPGr/Wfhrlem2CL/UcnUc1zcqKAImBDzukY7Y5F/yQiNdko6+fRLevlw1HgMySw7f611UIY408EtxRSoK3Q==}"
    "    hasBin: true"
    "    dependencies:"
    "      js-tokens: 4.0.0"
    "    dev: false"
    ""
    "  /react-redux/8.0.5_react@18.2.0:"
    "    resolution: {integrity: sha512-Q2f6fCKxPFpkXt1qNRZdEDLlScsDWyrgSj0mliK59qU6W5gvBiKkdMEG2lJzhd1rCctf0hb6EtePPLZ2e0m1uw==}"
    "    peerDependencies:"
    "      react: ^16.8 || ^17.0 || ^18.0"
    "    dependencies:"
    "      react: 18.2.0"
    "      use-sync-external-store: 1.2.0_react@18.2.0"
    "    dev: false"
    ""
    "  /react/18.2.0:"
    "    resolution: {integrity: sha512-/3IjMdb2L9QbBdWiW5e3P2/npwMBaU9mHCSCUzNln0ZCYbcfTsGbTJrU/kGemdH2IWmB2ioZ+zkxtmq6g09fGQ==}"
    "    engines: {node: '>=0.10.0'}"
    "    dependencies:"
    "      loose-envify: 1.4.0"
    "    dev: false"
    ""
    "  /use-sync-external-store/1.2.0_react@18.2.0:"
    "    resolution: {integrity: sha512-eEgnFxGQ1Ife9bzYs6VLi8/4X6CObHMw9Qr9tPY43iKwsPw8xE8+EFsf/2cFZ5S3esXgpWgtSCtLNS41F+sKPA==}"
    "    peerDependencies:"
    "      react: ^16.8.0 || ^17.0.0 || ^18.0.0"
    "    dependencies:"
    "      react: 18.2.0"
    "    dev: false"
};

/// Lockfile of a workspace with two projects, written by pnpm 8.
///
/// `packages/a` links to `packages/b` and depends on an alias, `packages/b` depends on a git
/// repository.
pub const WORKSPACE_LOCKFILE: &str = text_block_fnl! {
    "lockfileVersion: '6.0'"
    ""
    "settings:"
    "  autoInstallPeers: true"
    "  excludeLinksFromLockfile: false"
    ""
    "importers:"
    ""
    "  .:"
    "    devDependencies:"
    "      typescript:"
    "        specifier: ^5.1.0"
    "        version: 5.1.6"
    ""
    "  packages/a:"
    "    dependencies:"
    "      b:"
    "        specifier: workspace:*"
    "        version: link:../b"
    "      react:"
    "        specifier: ^18.2.0"
    "        version: 18.2.0"
    "      react-dom:"
    "        specifier: ^18.2.0"
    "        version: 18.2.0(react@18.2.0)"
    "      string-width-cjs:"
    "        specifier: npm:string-width@^4.2.0"
    "        version: /string-width@4.2.3"
    ""
    "  packages/b:"
    "    dependencies:"
    "      is-number:"
    "        specifier: ^7.0.0"
    "        version: 7.0.0"
    "      tauri-plugin-log:"
    "        specifier: github:tauri-apps/tauri-plugin-log#v1"
    "        version: github.com/tauri-apps/tauri-plugin-log/a3f4ed8c5e2b1d0c6b7a9e8f7d6c5b4a3f2e1d0c"
    ""
    "packages:"
    ""
    "  /ansi-regex@5.0.1:"
    "    resolution: {integrity: sha512-quJQXlTSUGL2LH9SUXo8VwsY4soanhgo6LNSm84E1LBcE8s3O0wpdiRzyR9z/ZZJMlMWv37qOOb9pdJlMUEKFQ==}"
    "    engines: {node: '>=8'}"
    "    dev: false"
    ""
    "  /is-number@7.0.0:"
    "    resolution: {integrity: sha512-41Cifkg6e8TylSpdtTpeLVMqvSBEVzTttHvERD741+pnZ8ANv0004MRL43QKPDlK9cGvNp6NZWZUBlbGXYxxng==}"
    "    engines: {node: '>=0.12.0'}"
    "    dev: false"
    ""
    "  /js-tokens@4.0.0:"
    "    resolution: {integrity: sha512-RdJUflcE3cUzKiMqQgsCu06FPu9UdIJO0beYbPhHN4k6apgJtifcoCtT9bcxOpYBtpD2kCM6Sbzg4CausW/PKQ==}"
    "    dev: false"
    ""
    "  /loose-envify@1.4.0:"
    "    resolution: {integrity: sha512-lyuxPGr/Wfhrlem2CL/UcnUc1zcqKAImBDzukY7Y5F/yQiNdko6+fRLevlw1HgMySw7f611UIY408EtxRSoK3Q==}"
    "    hasBin: true"
    "    dependencies:"
    "      js-tokens: 4.0.0"
    "    dev: false"
    ""
    "  /react-dom@18.2.0(react@18.2.0):"
    "    resolution: {integrity: sha512-6IMTriUmvsjHUjNtEDudZfuDQUoWXVxKHhlEGSk81n4YFS+r/Kl99wXiwlVXtPBtJenozv2P+hxDsw9eA7Xo6g==}"
    "    peerDependencies:"
    "      react: ^18.2.0"
    "    dependencies:"
    "      loose-envify: 1.4.0"
    "      react: 18.2.0"
    "      scheduler: 0.23.0"
    "    dev: false"
    ""
    "  /react@18.2.0:"
    "    resolution: {integrity: sha512-/3IjMdb2L9QbBdWiW5e3P2/npwMBaU9mHCSCUzNln0ZCYbcfTsGbTJrU/kGemdH2IWmB2ioZ+zkxtmq6g09fGQ==}"
    "    engines: {node: '>=0.10.0'}"
    "    dependencies:"
    "      loose-envify: 1.4.0"
    "    dev: false"
    ""
    "  /scheduler@0.23.0:"
    "    resolution: {integrity: sha512-CtuThmgHNg7zIZWAXi3AsyIzA3n4xx7aNyjwC2VJldO2LMVDhFK+63xGqq6CsJH4rTAt6/M+N4GhZiDYPx9eUw==}"
    "    dependencies:"
    "      loose-envify: 1.4.0"
    "    dev: false"
    ""
    "  /string-width@4.2.3:"
    "    resolution: {integrity: sha512-wKyQRQpjJ0sIp62ErSZdGsjMJWsap5oRNihHhu6G7JVO/9jIB6UyevL+tXuOqrng8j/cxKTWyWUwvSTriiZz/g==}"
    "    engines: {node: '>=8'}"
    "    dependencies:"
    "      ansi-regex: 5.0.1"
    "    dev: false"
    ""
    "  /typescript@5.1.6:"
    "    resolution: {integrity: sha512-zaWCozRZ6DLEWAWFrVDz1H6FVXzUSfTy5FUMWsQlU8Ym5JP9eO4xkTIROFCQvhQf61z6O/G6ugw3SgAnvvm+HA==}"
    "    engines: {node: '>=14.17'}"
    "    hasBin: true"
    "    dev: true"
    ""
    "  github.com/tauri-apps/tauri-plugin-log/a3f4ed8c5e2b1d0c6b7a9e8f7d6c5b4a3f2e1d0c:"
    "    resolution: {tarball: https://codeload.github.com/tauri-apps/tauri-plugin-log/tar.gz/a3f4ed8c5e2b1d0c6b7a9e8f7d6c5b4a3f2e1d0c}"
    "    name: tauri-plugin-log-api"
    "    version: 0.0.0"
    "    dev: false"
};

/// Create a single project with [`SINGLE_PROJECT_LOCKFILE`] in `root`.
pub fn create_single_project(root: &Path) {
    write_file(root, "package.json", r#"{ "name": "single-project", "version": "1.0.0" }"#);
    write_file(root, "pnpm-lock.yaml", SINGLE_PROJECT_LOCKFILE);
}

/// Create a workspace with [`WORKSPACE_LOCKFILE`] in `root`.
pub fn create_workspace(root: &Path) {
    write_file(root, "package.json", r#"{ "name": "workspace-root", "private": true }"#);
    write_file(root, "pnpm-workspace.yaml", "packages:\n  - 'packages/*'\n");
    write_file(root, "packages/a/package.json", r#"{ "name": "a", "version": "1.0.0" }"#);
    write_file(root, "packages/b/package.json", r#"{ "name": "b", "version": "1.0.0" }"#);
    write_file(root, "pnpm-lock.yaml", WORKSPACE_LOCKFILE);
}
