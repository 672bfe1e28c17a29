//! HTML rendering for the per-example wrapper pages and the gallery index.

/// Wrapper page served next to each compiled artifact.
///
/// The page enables the run button once the artifact is instantiated; each
/// run clears the console, runs the instance to completion, and then builds
/// a fresh instance from the cached module, since an instance can only be
/// run once.
const EXAMPLE_PAGE: &str = r#"
<!doctype html>
<html>

<head>
    <meta charset="utf-8">
    <title>$TITLE</title>
</head>

<body>
    <script src="$LOADER_URL"></script>
    <script>
        if (!WebAssembly.instantiateStreaming) { // polyfill
            WebAssembly.instantiateStreaming = async (resp, importObject) => {
                const source = await (await resp).arrayBuffer();
                return await WebAssembly.instantiate(source, importObject);
            };
        }

        const go = new Go();
        let mod, inst;
        WebAssembly.instantiateStreaming(fetch("$WASM_URL"), go.importObject).then((result) => {
            mod = result.module;
            inst = result.instance;
            document.getElementById("runButton").disabled = false;
        }).catch((err) => {
            console.error(err);
        });

        async function run() {
            console.clear();
            await go.run(inst);
            inst = await WebAssembly.instantiate(mod, go.importObject); // reset instance
        }
    </script>

    <button onClick="run();" id="runButton" disabled>Run</button>
</body>

</html>
"#;

const INDEX_HEADER: &str = r#"
<!doctype html>
<html>
<head>
    <meta charset="utf-8">
    <title>$SITE_NAME</title>
</head>

<body>
<h2>Welcome to the $SITE_NAME examples page (version=$REVISION)</h2>
This page shows a few <code>$SITE_SLUG</code> examples, compiled to <code>WASM</code>.

<ul>
"#;

const INDEX_FOOTER: &str = r#"
</ul>
</body>

</html>
"#;

/// Render the wrapper page for one example.
///
/// `wasm_url` is where the page fetches the compiled artifact from;
/// `loader_url` is the published location of the toolchain's JS loader.
pub fn example_page(title: &str, wasm_url: &str, loader_url: &str) -> String {
    EXAMPLE_PAGE
        .replace("$TITLE", title)
        .replace("$WASM_URL", wasm_url)
        .replace("$LOADER_URL", loader_url)
}

/// Builder for the gallery index page.
///
/// The heading embeds the upstream revision the run was built from;
/// examples are listed in the order they are pushed.
#[derive(Debug)]
pub struct IndexPage {
    body: String,
}

impl IndexPage {
    pub fn new(site_name: &str, revision: &str) -> Self {
        let body = INDEX_HEADER
            .replace("$SITE_NAME", site_name)
            .replace("$SITE_SLUG", &site_name.to_lowercase())
            .replace("$REVISION", revision);
        Self { body }
    }

    /// Append one list item linking to a finished example's page.
    pub fn push_example(&mut self, name: &str, href: &str) {
        self.body
            .push_str(&format!("<li><a href=\"{href}\">{name}</a></li>\n"));
    }

    /// Close the list and return the full page.
    pub fn finish(mut self) -> String {
        self.body.push_str(INDEX_FOOTER);
        self.body
    }
}
