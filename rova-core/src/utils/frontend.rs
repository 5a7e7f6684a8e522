//! Remote-control page.
//!
//! The page is served in three pieces: [`PAGE_HEAD`], the current forward
//! speed as decimal text, then [`PAGE_TAIL`]. The speed pre-positions the
//! slider, which reports its moves back through `/speed?v=`.

pub(crate) const PAGE_HEAD: &str = r#"<!doctype html><html><head>
<meta name=viewport content="width=device-width,initial-scale=1">
<title>Rova-4 Controller</title>
<style>
body{font-family:sans-serif;text-align:center;margin:20px}
button{font-size:28px;padding:12px 22px;margin:6px}
#row{display:flex;justify-content:center;gap:10px}
</style></head><body>
<h2>Rova-4 Remote</h2>
<div><a href="/f"><button>^ Forward</button></a></div>
<div id=row>
  <a href="/l"><button>&lt;- Left</button></a>
  <a href="/s"><button>&bull; Stop</button></a>
  <a href="/r"><button>-&gt; Right</button></a>
</div>
<div><a href="/b"><button>v Back</button></a></div>
<p>Speed: <input type="range" id="sp" min="10000" max="65535" value=""#;

pub(crate) const PAGE_TAIL: &str = r#""
oninput="fetch('/speed?v='+this.value)"></p>
</body></html>
"#;
