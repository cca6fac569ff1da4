//! Renderer
//!
//! Turns a [`Node`] back into configuration text. Layout is rebuilt from
//! the tree rather than preserved from the source: four spaces per level,
//! a blank line after every block, and comments kept next to the
//! statement they annotate.

use crate::error::Result;
use crate::node::Node;
use std::fmt;
use std::io::Write;

const INDENT: &str = "    ";

/// State threaded through a single [`Node::dump`] call.
#[derive(Debug)]
struct DumpContext {
    /// The previous sibling was a comment line
    prev_comment: bool,
    /// The previous sibling was a block
    prev_block: bool,
    /// The node being rendered is the first child of its parent
    block_start: bool,
    /// No top-level block has been rendered yet
    first_block: bool,
}

impl DumpContext {
    fn new() -> Self {
        Self {
            prev_comment: false,
            prev_block: false,
            block_start: true,
            first_block: true,
        }
    }

    /// Whether `node` gets a blank line before it.
    fn blank_line_before(&mut self, node: &Node, parent_is_root: bool) -> bool {
        let mut blank = if node.is_comment() {
            self.prev_block || !(self.prev_comment || self.block_start)
        } else {
            self.prev_block
        };

        if node.is_block() && parent_is_root && self.first_block {
            self.first_block = false;
            if !self.block_start && !self.prev_comment {
                blank = true;
            }
        }

        blank
    }
}

impl Node {
    /// Render the node and its descendants at the given indentation level.
    pub fn dump(&self, indent: usize) -> String {
        let mut ctx = DumpContext::new();
        self.dump_with(indent, &mut ctx, self.is_root())
    }

    /// Write `dump(0)` to `writer`, returning the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let text = self.dump(0);
        writer.write_all(text.as_bytes())?;
        Ok(text.len())
    }

    fn dump_with(&self, indent: usize, ctx: &mut DumpContext, parent_is_root: bool) -> String {
        if self.is_root() {
            return self.dump_children(indent, ctx);
        }

        let mut out = String::new();
        if ctx.blank_line_before(self, parent_is_root) {
            out.push('\n');
        }

        let spaces = INDENT.repeat(indent);
        out.push_str(&spaces);
        out.push_str(self.directive());
        for arg in self.args() {
            out.push(' ');
            out.push_str(arg);
        }

        if self.is_block() {
            out.push_str(" {\n");
            out.push_str(&self.dump_children(indent + 1, ctx));
            out.push('\n');
            out.push_str(&spaces);
            out.push('}');
        } else if !self.is_comment() {
            out.push(';');
        }

        ctx.prev_comment = self.is_comment();
        ctx.prev_block = self.is_block();
        out
    }

    fn dump_children(&self, indent: usize, ctx: &mut DumpContext) -> String {
        ctx.prev_comment = false;
        ctx.prev_block = false;

        let mut lines = Vec::with_capacity(self.children().len());
        for (i, child) in self.children().iter().enumerate() {
            ctx.block_start = i == 0;
            lines.push(child.dump_with(indent, ctx, self.is_root()));
        }
        lines.join("\n")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(words: &[&str]) -> Node {
        Node::new(words.iter().map(|w| w.to_string()).collect(), false).unwrap()
    }

    fn block(words: &[&str], children: Vec<Node>) -> Node {
        let mut block = node(words);
        for child in children {
            block.push_child(child).unwrap();
        }
        block
    }

    fn root(children: Vec<Node>) -> Node {
        let mut root = Node::root();
        for child in children {
            root.push_child(child).unwrap();
        }
        root
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(Node::root().dump(0), "");
        assert_eq!(Node::root().to_string(), "");
    }

    #[test]
    fn test_simple_statements() {
        let tree = root(vec![node(&["worker_processes", "auto"]), node(&["daemon"])]);
        assert_eq!(tree.to_string(), "worker_processes auto;\ndaemon;");
    }

    #[test]
    fn test_first_block_separated_from_statements() {
        let tree = root(vec![
            node(&["pid", "/run/nginx.pid"]),
            block(&["events"], vec![node(&["worker_connections", "1024"])]),
        ]);
        assert_eq!(
            tree.to_string(),
            "pid /run/nginx.pid;\n\nevents {\n    worker_connections 1024;\n}"
        );
    }

    #[test]
    fn test_first_node_has_no_blank_line() {
        let tree = root(vec![block(&["http"], vec![node(&["sendfile", "on"])])]);
        assert_eq!(tree.to_string(), "http {\n    sendfile on;\n}");
    }

    #[test]
    fn test_blank_line_after_block() {
        let tree = root(vec![
            block(
                &["stream"],
                vec![
                    block(&["upstream", "backend"], vec![node(&["hash", "$remote_addr"])]),
                    block(&["server"], vec![node(&["listen", "127.0.0.1:8443"])]),
                    node(&["tcp_nodelay", "on"]),
                    node(&["proxy_timeout", "1s"]),
                ],
            ),
            node(&["# trailing"]),
        ]);
        let expected = "stream {
    upstream backend {
        hash $remote_addr;
    }

    server {
        listen 127.0.0.1:8443;
    }

    tcp_nodelay on;
    proxy_timeout 1s;
}

# trailing";
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn test_comment_grouping() {
        let tree = root(vec![block(
            &["http"],
            vec![
                node(&["#", "Basic", "Settings"]),
                node(&["sendfile", "on"]),
                node(&["tcp_nopush", "on"]),
                node(&["#", "SSL", "Settings"]),
                node(&["#", "Dropping", "SSLv3"]),
                node(&["ssl_prefer_server_ciphers", "on"]),
            ],
        )]);
        let expected = "http {
    # Basic Settings
    sendfile on;
    tcp_nopush on;

    # SSL Settings
    # Dropping SSLv3
    ssl_prefer_server_ciphers on;
}";
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn test_comment_stays_with_first_block() {
        let tree = root(vec![
            node(&["user", "www-data"]),
            node(&["#", "event", "loop"]),
            block(&["events"], vec![node(&["use", "epoll"])]),
        ]);
        assert_eq!(
            tree.to_string(),
            "user www-data;\n\n# event loop\nevents {\n    use epoll;\n}"
        );
    }

    #[test]
    fn test_leading_comment() {
        let tree = root(vec![node(&["#", "main"]), node(&["user", "nginx"])]);
        assert_eq!(tree.to_string(), "# main\nuser nginx;");
    }

    #[test]
    fn test_comment_empty_args_keep_spacing() {
        let tree = root(vec![node(&["#", "", "indented"])]);
        assert_eq!(tree.to_string(), "#  indented");
    }

    #[test]
    fn test_block_with_args() {
        let tree = root(vec![block(
            &["location", "~", "\\.php$"],
            vec![node(&["fastcgi_pass", "unix:/run/php.sock"])],
        )]);
        assert_eq!(
            tree.to_string(),
            "location ~ \\.php$ {\n    fastcgi_pass unix:/run/php.sock;\n}"
        );
    }

    #[test]
    fn test_dump_subtree_with_indent() {
        let server = block(&["server"], vec![node(&["listen", "80"])]);
        assert_eq!(server.dump(1), "    server {\n        listen 80;\n    }");
    }

    #[test]
    fn test_emptied_block_renders_as_statement() {
        let mut tree = root(vec![block(&["events"], vec![node(&["use", "epoll"])])]);
        tree.get_mut("events", &[])[0].del("use", &[]);
        assert_eq!(tree.to_string(), "events;");
    }

    #[test]
    fn test_write_to() {
        let tree = root(vec![node(&["worker_processes", "4"])]);
        let mut out = Vec::new();
        let written = tree.write_to(&mut out).unwrap();
        assert_eq!(written, "worker_processes 4;".len());
        assert_eq!(out, b"worker_processes 4;");
    }
}
