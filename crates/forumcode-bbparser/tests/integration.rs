use forumcode_bbparser::{
    render, BBRenderer, DiagnosticKind, ForumRoutes, LinkResolver, RenderOptions,
};
use std::sync::Arc;

fn plain() -> BBRenderer {
    BBRenderer::new().with_options(RenderOptions::default().paragraphs(false))
}

mod formatting {
    use super::*;

    #[test]
    fn bold() {
        assert!(render("[b]bold[/b]").contains("<strong>bold</strong>"));
    }

    #[test]
    fn italic() {
        assert!(render("[i]italic[/i]").contains("<i>italic</i>"));
    }

    #[test]
    fn underline() {
        assert!(render("[u]underline[/u]").contains("<u>underline</u>"));
    }

    #[test]
    fn color() {
        assert!(render("[color=red]red[/color]").contains(r#"<span style="color: red;">red</span>"#));
    }

    #[test]
    fn whole_document_is_one_paragraph() {
        assert_eq!(render("[b]bold[/b]"), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn formatting_inside_formatting() {
        assert_eq!(
            plain().render("[color=#c00][b]rot[/b] :)[/color]"),
            "<span style=\"color: #c00;\"><strong>rot</strong> <img alt=\"fröhlich\" title=\":)\" class=\"inline-block align-middle\" src=\"/images/smileys/laechel.gif\" /></span>"
        );
    }
}

mod links {
    use super::*;

    #[test]
    fn simple_url() {
        assert!(render("[url]http://example.com[/url]").contains(
            r#"<a href="http://example.com" class="link-underline" target="_blank" rel="nofollow">http://example.com</a>"#
        ));
    }

    #[test]
    fn named_url() {
        assert!(render("[url=http://example.com]Example[/url]").contains(
            r#"<a href="http://example.com" class="link-underline" target="_blank" rel="nofollow">Example</a>"#
        ));
    }

    #[test]
    fn image() {
        assert!(render("[img]http://example.com/image.jpg[/img]").contains(
            r#"<img src="http://example.com/image.jpg" class="max-w-full h-auto rounded my-2" />"#
        ));
    }

    #[test]
    fn url_body_is_not_smiley_processed() {
        assert_eq!(
            plain().render("[url]http://example.com/a:)b;)[/url]"),
            r#"<a href="http://example.com/a:)b;)" class="link-underline" target="_blank" rel="nofollow">http://example.com/a:)b;)</a>"#
        );
        assert_eq!(
            plain().render("[img]http://example.com/8-).png[/img]"),
            r#"<img src="http://example.com/8-).png" class="max-w-full h-auto rounded my-2" />"#
        );
    }

    #[test]
    fn url_query_ampersands_are_escaped() {
        assert!(plain()
            .render("[url]http://a.de/?x=1&y=2[/url]")
            .starts_with(r#"<a href="http://a.de/?x=1&amp;y=2""#));
    }

    #[test]
    fn named_url_text_is_rendered() {
        assert_eq!(
            plain().render("[url=http://a.de][b]A[/b][/url]"),
            r#"<a href="http://a.de" class="link-underline" target="_blank" rel="nofollow"><strong>A</strong></a>"#
        );
    }

    #[test]
    fn javascript_urls_are_not_rewritten() {
        // No scheme allow-listing; only escaping applies.
        assert!(plain()
            .render("[url=javascript:alert(1)]x[/url]")
            .starts_with(r#"<a href="javascript:alert(1)""#));
    }
}

mod forum_links {
    use super::*;

    fn routes() -> BBRenderer {
        BBRenderer::new()
            .link_resolver(ForumRoutes::default().thread("test-thread", "Test Thread Title"))
    }

    #[test]
    fn post_link_with_custom_text() {
        let result = routes().render("[post=123]My Custom Link[/post]");
        assert!(result.contains(r#"href="/cocktailforum/beitrag/123""#));
        assert!(result.contains(r#"class="link-underline""#));
        assert!(result.contains(">My Custom Link</a>"));
        assert!(!result.contains(r#"target="_blank""#));
        assert!(!result.contains(r#"rel="nofollow""#));
    }

    #[test]
    fn post_link_with_generated_text() {
        let result = routes().render("[post=456][/post]");
        assert!(result.contains(r#"href="/cocktailforum/beitrag/456""#));
        assert!(result.contains(">Beitrag #456</a>"));
    }

    #[test]
    fn post_link_with_hash_and_alphanumeric_id() {
        let result = routes().render("[post=#xpGSk7C4]Link text[/post]");
        assert!(result.contains(r#"href="/cocktailforum/beitrag/xpGSk7C4""#));
        assert!(result.contains(">Link text</a>"));
    }

    #[test]
    fn invalid_post_id_stays_text() {
        let result = routes().render("[post=abc-123]Invalid[/post]");
        assert!(result.contains("[post=abc-123]Invalid[/post]"));
    }

    #[test]
    fn thread_link_with_custom_text() {
        let result = routes().render("[thread=test-thread]Custom Thread Link[/thread]");
        assert!(result.contains(r#"href="/cocktailforum/thema/test-thread""#));
        assert!(result.contains(r#"title="Zum Thema: test-thread""#));
        assert!(result.contains(">Custom Thread Link</a>"));
        assert!(!result.contains(r#"target="_blank""#));
    }

    #[test]
    fn thread_link_with_known_title() {
        let result = routes().render("[thread=test-thread][/thread]");
        assert!(result.contains(r#"href="/cocktailforum/thema/test-thread""#));
        assert!(result.contains(">Test Thread Title</a>"));
    }

    #[test]
    fn thread_link_falls_back_to_slug() {
        let result = routes().render("[thread=nonexistent][/thread]");
        assert!(result.contains(r#"href="/cocktailforum/thema/nonexistent""#));
        assert!(result.contains(">nonexistent</a>"));
    }

    #[test]
    fn invalid_slug_stays_text() {
        let result = routes().render("[thread=Invalid_Slug]Text[/thread]");
        assert!(result.contains("[thread=Invalid_Slug]Text[/thread]"));
    }

    #[test]
    fn mixed_with_other_markup() {
        let result = routes().render("[b]Bold[/b] [post=123]Link[/post]");
        assert!(result.contains("<strong>Bold</strong>"));
        assert!(result.contains(r#"href="/cocktailforum/beitrag/123""#));
    }

    struct Titles;

    impl LinkResolver for Titles {
        fn post_path(&self, public_id: &str) -> String {
            format!("/p/{}", public_id)
        }

        fn thread_path(&self, slug: &str) -> String {
            format!("/t/{}", slug)
        }

        fn thread_title(&self, _slug: &str) -> Option<String> {
            Some("<Gin & Tonic>".to_string())
        }
    }

    #[test]
    fn custom_resolver_output_is_escaped() {
        let renderer = plain().link_resolver(Titles);
        assert_eq!(
            renderer.render("[thread=gin][/thread]"),
            r#"<a href="/t/gin" class="link-underline" title="Zum Thema: gin">&lt;Gin &amp; Tonic&gt;</a>"#
        );
        assert_eq!(
            renderer.render("[post=9]x[/post]"),
            r#"<a href="/p/9" class="link-underline" title="Zum Beitrag">x</a>"#
        );
    }
}

mod quotes {
    use super::*;

    #[test]
    fn simple_quote() {
        assert!(render("[quote]text[/quote]")
            .contains(r#"<div class="quote"><div class="quote-content">text</div></div>"#));
    }

    #[test]
    fn named_quote_legacy_style() {
        assert!(render("[quote Name]text[/quote]").contains(
            r#"<div class="quote"><div class="quote-author">Name schrieb:</div><div class="quote-content">text</div></div>"#
        ));
    }

    #[test]
    fn named_quote_with_equals() {
        assert!(render("[quote=Name]text[/quote]").contains(
            r#"<div class="quote"><div class="quote-author">Name schrieb:</div><div class="quote-content">text</div></div>"#
        ));
    }

    #[test]
    fn nested_quotes() {
        let html = render("[quote A]Outer [quote B]Inner[/quote] Tail[/quote]");
        assert_eq!(
            html,
            concat!(
                "<div class=\"quote\"><div class=\"quote-author\">A schrieb:</div>",
                "<div class=\"quote-content\">Outer ",
                "<div class=\"quote\"><div class=\"quote-author\">B schrieb:</div>",
                "<div class=\"quote-content\">Inner</div></div>",
                " Tail</div></div>"
            )
        );
    }

    #[test]
    fn sibling_quotes_inside_quote() {
        assert_eq!(
            plain().render("[quote=A][quote=B]b[/quote][quote=C]c[/quote]a[/quote]"),
            concat!(
                "<div class=\"quote\"><div class=\"quote-author\">A schrieb:</div><div class=\"quote-content\">",
                "<div class=\"quote\"><div class=\"quote-author\">B schrieb:</div><div class=\"quote-content\">b</div></div>",
                "<div class=\"quote\"><div class=\"quote-author\">C schrieb:</div><div class=\"quote-content\">c</div></div>",
                "a</div></div>"
            )
        );
    }

    #[test]
    fn quote_content_is_rendered() {
        assert_eq!(
            plain().render("[quote=Ben][b]Ja[/b]\n:D[/quote]"),
            concat!(
                "<div class=\"quote\"><div class=\"quote-author\">Ben schrieb:</div><div class=\"quote-content\">",
                "<strong>Ja</strong><br />\n",
                "<img alt=\"grins\" title=\":D\" class=\"inline-block align-middle\" src=\"/images/smileys/grins.gif\" />",
                "</div></div>"
            )
        );
    }

    #[test]
    fn unmatched_opener_is_text() {
        assert_eq!(
            plain().render("[quote=A]one [quote=B]two[/quote]"),
            "[quote=A]one <div class=\"quote\"><div class=\"quote-author\">B schrieb:</div><div class=\"quote-content\">two</div></div>"
        );
    }

    #[test]
    fn author_is_escaped() {
        assert!(plain()
            .render("[quote=<b>x</b>]y[/quote]")
            .contains("<div class=\"quote-author\">&lt;b&gt;x&lt;/b&gt; schrieb:</div>"));
    }

    #[test]
    fn reply_round_trips() {
        let reply = forumcode_bbparser::quote_reply(Some("Anna"), "[b]Hallo[/b]");
        assert_eq!(
            plain().render(&reply),
            "<div class=\"quote\"><div class=\"quote-author\">Anna schrieb:</div><div class=\"quote-content\"><strong>Hallo</strong></div></div>"
        );
    }
}

mod smileys {
    use super::*;

    #[test]
    fn renders_smileys() {
        let html = render(":) text");
        assert!(html.contains("<img"));
        assert!(html.contains(r#"alt="fröhlich""#));
        assert!(html.contains(r#"src="/images/smileys/laechel.gif""#));
    }

    #[test]
    fn adjacent_smileys() {
        let html = plain().render(":(:lol:");
        assert!(html.contains(r#"alt="traurig""#));
        assert!(html.contains(r#"alt="lol""#));
    }

    #[test]
    fn disabled() {
        let renderer = plain().with_options(RenderOptions::default().paragraphs(false).smileys(false));
        assert_eq!(renderer.render(":) ;-)"), ":) ;-)");
    }

    #[test]
    fn unknown_shortcodes_stay_text() {
        assert_eq!(plain().render(":nope: 12:30"), ":nope: 12:30");
    }
}

mod escaping {
    use super::*;

    #[test]
    fn escapes_html() {
        let html = render("<script>alert('xss')</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn attribute_breakout_is_escaped() {
        assert_eq!(
            plain().render(r#"[color=red" onclick="alert(1)]x[/color]"#),
            r#"<span style="color: red&quot; onclick=&quot;alert(1);">x</span>"#
        );
        assert!(plain()
            .render(r#"[img]x" onerror="alert(1)[/img]"#)
            .starts_with(r#"<img src="x&quot; onerror=&quot;alert(1)""#));
    }

    #[test]
    fn markup_inside_tags_is_escaped() {
        assert_eq!(
            plain().render("[b]<i>[/b]"),
            "<strong>&lt;i&gt;</strong>"
        );
    }
}

mod newlines {
    use super::*;

    #[test]
    fn handles_newlines() {
        assert!(render("line 1\nline 2").contains("<br />"));
    }

    #[test]
    fn blank_line_starts_paragraph() {
        assert_eq!(render("eins\n\nzwei"), "<p>eins</p>\n\n<p>zwei</p>");
    }
}

mod reporting {
    use super::*;

    #[test]
    fn collects_recovery_events() {
        let rendered = BBRenderer::new().render_with_report("[b]x [/quote]");
        let kinds: Vec<_> = rendered.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::UnmatchedOpen, DiagnosticKind::UnexpectedClose]
        );
        assert_eq!(rendered.html, "<p>[b]x [/quote]</p>");
    }

    #[test]
    fn depth_limit_is_reported() {
        let renderer = BBRenderer::new()
            .with_options(RenderOptions::default().max_quote_depth(1));
        let rendered = renderer.render_with_report("[quote][quote]x[/quote][/quote]");
        assert!(rendered
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::DepthLimit));
    }
}

#[test]
fn renderer_is_shareable_between_threads() {
    let renderer = Arc::new(BBRenderer::new());
    let expected = renderer.render("[quote=A][b]x[/b][/quote]");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let renderer = Arc::clone(&renderer);
            let expected = expected.clone();
            scope.spawn(move || {
                for _ in 0..100 {
                    assert_eq!(renderer.render("[quote=A][b]x[/b][/quote]"), expected);
                }
            });
        }
    });
}
