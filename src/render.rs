use crate::config::SiteConfig;
use crate::dom::{self, Document, MemoryDocument};
use crate::models::entry::{BlogPost, CardEntry, Project, PLACEHOLDER_LINK};

#[derive(Debug, Clone, Copy, PartialEq)]
enum CardStyle {
    Project,
    Blog,
}

impl CardStyle {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Blog => "blog",
        }
    }

    fn action_label(&self) -> &'static str {
        match self {
            Self::Project => "View Project →",
            Self::Blog => "Read More →",
        }
    }
}

/// Render one card per entry, in the order given.
/// The link rides in `data-href` so no entry text ever lands inside script.
fn cards<E: CardEntry>(entries: &[E], style: CardStyle) -> String {
    let p = style.prefix();
    let mut html = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let link = html_escape(safe_href(entry.link()));

        let date_html = match entry.date() {
            Some(d) if !d.trim().is_empty() => {
                format!("<div class=\"{p}-date\">{}</div>", html_escape(d))
            }
            _ => String::new(),
        };

        let tags_html = if style == CardStyle::Project {
            let tags: String = entry
                .tags()
                .iter()
                .map(|t| format!("<span class=\"tag\">{}</span>", html_escape(t)))
                .collect();
            format!("<div class=\"{p}-tags\">{}</div>", tags)
        } else {
            String::new()
        };

        html.push_str(&format!(
            "<div class=\"{p}-card\" data-index=\"{index}\" data-href=\"{link}\">\
             <div class=\"{p}-image\">{icon}</div>\
             <div class=\"{p}-content\">\
             {date_html}\
             <h3 class=\"{p}-title\">{title}</h3>\
             <p class=\"{p}-{body_class}\">{body}</p>\
             {tags_html}\
             <a href=\"{link}\" class=\"{p}-link\" data-action=\"open\" target=\"_blank\" rel=\"noopener\">{label}</a>\
             </div>\
             </div>",
            p = p,
            index = index,
            link = link,
            icon = html_escape(entry.icon()),
            date_html = date_html,
            title = html_escape(entry.title()),
            body_class = if style == CardStyle::Project { "description" } else { "excerpt" },
            body = html_escape(entry.body()),
            tags_html = tags_html,
            label = style.action_label(),
        ));
    }
    html
}

pub fn project_cards(projects: &[Project]) -> String {
    cards(projects, CardStyle::Project)
}

pub fn blog_cards(posts: &[BlogPost]) -> String {
    cards(posts, CardStyle::Blog)
}

/// Replace the projects grid. A page without the grid is left untouched.
pub fn render_projects<D: Document + ?Sized>(doc: &mut D, projects: &[Project]) -> bool {
    doc.replace_children(dom::PROJECTS_GRID, project_cards(projects))
}

/// Replace the blog grid. A page without the grid is left untouched.
pub fn render_blog<D: Document + ?Sized>(doc: &mut D, posts: &[BlogPost]) -> bool {
    doc.replace_children(dom::BLOG_GRID, blog_cards(posts))
}

/// Script-bearing URL schemes are replaced with the placeholder link.
pub fn safe_href(link: &str) -> &str {
    let lower = link.trim_start().to_ascii_lowercase();
    if ["javascript:", "data:", "vbscript:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        PLACEHOLDER_LINK
    } else {
        link
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Serialize the prerendered document into the full single page.
/// `flash` is the contact confirmation carried over from a no-JS submission.
pub fn page_html(config: &SiteConfig, doc: &MemoryDocument, flash: Option<&str>) -> String {
    let title = html_escape(&config.site_title);
    let owner = html_escape(&config.owner_name);

    let nav_links: String = [
        ("home", "Home"),
        ("projects", "Projects"),
        ("blog", "Blog"),
        ("contact", "Contact"),
    ]
    .iter()
    .map(|(id, label)| {
        format!(
            "<li><a href=\"#{id}\" id=\"nav-{id}\" class=\"nav-link\">{label}</a></li>",
            id = id,
            label = label
        )
    })
    .collect();

    let flash_html = match flash {
        Some(msg) if !msg.is_empty() => format!(
            "<div class=\"contact-flash\" role=\"status\">{}</div>",
            html_escape(msg)
        ),
        _ => String::new(),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/css/style.css">
{css}
</head>
<body>
<nav class="navbar">
<div class="nav-container">
<a href="#home" class="nav-logo">{owner}</a>
<ul class="nav-menu" id="{nav_menu}">{nav_links}</ul>
<div class="hamburger" id="{toggle}"><span class="bar"></span><span class="bar"></span><span class="bar"></span></div>
</div>
</nav>
<section id="home" class="hero">
<div class="hero-content">
<h1 class="hero-title">Hi, I'm {owner}</h1>
<p class="hero-subtitle">{tagline}</p>
<a href="#projects" class="btn btn-primary">View My Work</a>
</div>
</section>
<section id="projects" class="projects">
<h2 class="section-title">Projects</h2>
<div class="projects-grid" id="{projects_grid}">{projects}</div>
</section>
<section id="blog" class="blog">
<h2 class="section-title">Blog</h2>
<div class="blog-grid" id="{blog_grid}">{blog}</div>
</section>
<section id="contact" class="contact">
<h2 class="section-title">Get In Touch</h2>
{flash_html}<form id="{contact_form}" class="contact-form" method="post" action="/contact">
<div class="form-group"><input type="text" id="name" name="name" placeholder="Your Name" required></div>
<div class="form-group"><input type="email" id="email" name="email" placeholder="Your Email" required></div>
<div class="form-group"><textarea id="message" name="message" rows="5" placeholder="Your Message" required></textarea></div>
<div style="display:none"><input type="text" name="_honey" tabindex="-1" autocomplete="off"></div>
<button type="submit" class="btn btn-primary">Send Message</button>
</form>
</section>
<footer class="footer"><p>&copy; {owner}. All rights reserved.</p></footer>
{script}
</body>
</html>"##,
        title = title,
        css = css(),
        owner = owner,
        nav_menu = dom::NAV_MENU,
        nav_links = nav_links,
        toggle = dom::MENU_TOGGLE,
        tagline = html_escape(&config.tagline),
        projects_grid = dom::PROJECTS_GRID,
        projects = doc.inner_html(dom::PROJECTS_GRID).unwrap_or(""),
        blog_grid = dom::BLOG_GRID,
        blog = doc.inner_html(dom::BLOG_GRID).unwrap_or(""),
        flash_html = flash_html,
        contact_form = dom::CONTACT_FORM,
        script = behaviour_script(config),
    )
}

pub fn css() -> &'static str {
    r#"<style>
@keyframes fadeInUp { from { opacity:0; transform:translateY(30px); } to { opacity:1; transform:translateY(0); } }
section.revealed { animation:fadeInUp 0.6s ease forwards; }
.nav-link.active { color:var(--primary-color, #2563eb); }
.project-card, .blog-card { cursor:pointer; }
.contact-flash { padding:12px; margin-bottom:16px; border-radius:6px; background:rgba(34,197,94,.12); color:#16a34a; }
@media (max-width:768px) {
    .nav-menu { display:none; }
    .nav-menu.active { display:flex; flex-direction:column; }
}
</style>"#
}

/// Same-origin route the page script posts contact messages to. The server
/// relays them to the configured contact endpoint.
pub const CONTACT_ENDPOINT: &str = "/api/contact";

/// Browser half of the page controllers. Constants come from the same
/// config the server-side controllers read.
pub fn behaviour_script(config: &SiteConfig) -> String {
    let contact_url_js =
        serde_json::to_string(CONTACT_ENDPOINT).unwrap_or_else(|_| "\"\"".into());
    let confirmation_js =
        serde_json::to_string(&config.confirmation_message).unwrap_or_else(|_| "\"\"".into());

    format!(
        "<script>\
\n(function(){{\
\nvar OFFSET={offset},THRESHOLD={threshold},INSET={inset};\
\nvar CONTACT_URL={contact_url},CONFIRM={confirm};\
\nvar menu=document.getElementById('{nav_menu}');\
\nvar toggle=document.getElementById('{toggle}');\
\nvar links=document.querySelectorAll('.nav-link');\
\nif(toggle&&menu)toggle.addEventListener('click',function(){{menu.classList.toggle('active');}});\
\nlinks.forEach(function(l){{l.addEventListener('click',function(){{if(menu)menu.classList.remove('active');}});}});\
\nfunction updateActive(){{\
\n    var y=window.pageYOffset,found=null;\
\n    document.querySelectorAll('section[id]').forEach(function(s){{\
\n        var top=s.offsetTop-OFFSET;\
\n        if(y>top&&y<=top+s.offsetHeight)found=s.id;\
\n    }});\
\n    links.forEach(function(l){{l.classList.remove('active');}});\
\n    if(found){{var a=document.querySelector('.nav-link[href=\"#'+found+'\"]');if(a)a.classList.add('active');}}\
\n}}\
\nwindow.addEventListener('scroll',updateActive);\
\nupdateActive();\
\ndocument.querySelectorAll('a[href^=\"#\"]:not([data-action])').forEach(function(a){{\
\n    a.addEventListener('click',function(e){{\
\n        e.preventDefault();\
\n        var id=this.getAttribute('href').slice(1);\
\n        var t=id?document.getElementById(id):null;\
\n        if(t)t.scrollIntoView({{behavior:'smooth',block:'start'}});\
\n    }});\
\n}});\
\ndocument.querySelectorAll('.project-card,.blog-card').forEach(function(c){{\
\n    c.addEventListener('click',function(){{window.open(c.dataset.href||'#','_blank');}});\
\n    var act=c.querySelector('[data-action=open]');\
\n    if(act)act.addEventListener('click',function(e){{e.preventDefault();e.stopPropagation();window.open(c.dataset.href||'#','_blank');}});\
\n}});\
\nvar form=document.getElementById('{contact_form}');\
\nif(form&&CONTACT_URL)form.addEventListener('submit',function(e){{\
\n    e.preventDefault();\
\n    var hp=form.querySelector('[name=_honey]');\
\n    var data={{name:form.querySelector('#name').value,email:form.querySelector('#email').value,message:form.querySelector('#message').value,_honey:hp?hp.value:''}};\
\n    var done=function(){{alert(CONFIRM);form.reset();}};\
\n    fetch(CONTACT_URL,{{method:'POST',headers:{{'Content-Type':'application/json'}},body:JSON.stringify(data)}})\
\n    .then(function(r){{if(!r.ok)throw new Error('status '+r.status);}})\
\n    .catch(function(err){{console.log('contact:',err);}})\
\n    .then(done);\
\n}});\
\nif('IntersectionObserver' in window){{\
\n    var obs=new IntersectionObserver(function(entries){{\
\n        entries.forEach(function(en){{\
\n            if(en.isIntersecting){{en.target.classList.add('revealed');obs.unobserve(en.target);}}\
\n        }});\
\n    }},{{threshold:THRESHOLD,rootMargin:'0px 0px -'+INSET+'px 0px'}});\
\n    document.querySelectorAll('section').forEach(function(s){{obs.observe(s);}});\
\n}}\
\n}})();\
\n</script>",
        offset = config.header_offset,
        threshold = config.reveal_threshold,
        inset = config.reveal_bottom_inset,
        contact_url = contact_url_js,
        confirm = confirmation_js,
        nav_menu = dom::NAV_MENU,
        toggle = dom::MENU_TOGGLE,
        contact_form = dom::CONTACT_FORM,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Catalogs;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_one_card_per_project_in_order() {
        let projects = Catalogs::builtin().projects;
        let html = project_cards(&projects);
        assert_eq!(count(&html, "class=\"project-card\""), projects.len());
        let first = html.find("E-Commerce Platform").unwrap();
        let last = html.find("Recipe Finder App").unwrap();
        assert!(first < last);
        assert!(html.contains("<span class=\"tag\">React Native</span>"));
    }

    #[test]
    fn test_blog_cards_show_date_and_no_tags() {
        let posts = Catalogs::builtin().blog_posts;
        let html = blog_cards(&posts);
        assert_eq!(count(&html, "class=\"blog-card\""), 6);
        assert!(html.contains("<div class=\"blog-date\">March 15, 2024</div>"));
        assert!(!html.contains("class=\"tag\""));
        assert_eq!(count(&html, "Read More →"), 6);
    }

    #[test]
    fn test_card_text_is_escaped() {
        let projects = vec![Project {
            id: 1,
            title: "<script>alert(1)</script>".into(),
            description: "Tom & \"Jerry\"".into(),
            tags: vec!["<b>".into()],
            icon: None,
            link: Some("javascript:'x'\" onclick=\"evil()".into()),
        }];
        let html = project_cards(&projects);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(!html.contains("evil()"));
        assert!(html.contains("data-href=\"#\""));
        assert!(html.contains("📝"));
    }

    #[test]
    fn test_rerender_replaces_previous_cards() {
        let mut doc = MemoryDocument::portfolio_layout();
        let projects = Catalogs::builtin().projects;
        render_projects(&mut doc, &projects);
        render_projects(&mut doc, &projects[..2]);
        let html = doc.inner_html(dom::PROJECTS_GRID).unwrap();
        assert_eq!(count(html, "class=\"project-card\""), 2);
        assert!(!html.contains("Recipe Finder App"));

        let once = html.to_string();
        render_projects(&mut doc, &projects[..2]);
        assert_eq!(doc.inner_html(dom::PROJECTS_GRID).unwrap(), once);
    }

    #[test]
    fn test_missing_container_is_noop() {
        let mut doc = MemoryDocument::new();
        assert!(!render_blog(&mut doc, &Catalogs::builtin().blog_posts));
        assert!(doc.inner_html(dom::BLOG_GRID).is_none());
    }

    #[test]
    fn test_page_html_embeds_grids_and_flash() {
        let config = SiteConfig::default();
        let mut doc = MemoryDocument::portfolio_layout();
        render_projects(&mut doc, &Catalogs::builtin().projects);
        let page = page_html(&config, &doc, Some("Thanks <3"));
        assert!(page.contains("id=\"projectsGrid\"><div class=\"project-card\""));
        assert!(page.contains("Thanks &lt;3"));
        assert!(page.contains("href=\"#blog\" id=\"nav-blog\" class=\"nav-link\""));
        assert!(page.contains("var OFFSET=100,THRESHOLD=0.1,INSET=50;"));
    }

    #[test]
    fn test_script_posts_contact_to_same_origin() {
        let config = SiteConfig {
            api_base: "http://10.1.2.3:5000".into(),
            ..SiteConfig::default()
        };
        let script = behaviour_script(&config);
        assert!(script.contains("var CONTACT_URL=\"/api/contact\","));
        assert!(!script.contains("10.1.2.3"));
        assert!(script.contains("_honey:hp?hp.value:''"));
    }

    #[test]
    fn test_card_action_opens_link_itself() {
        let script = behaviour_script(&SiteConfig::default());
        // Smooth scrolling must not swallow the card action links (href="#")
        assert!(script.contains("querySelectorAll('a[href^=\"#\"]:not([data-action])')"));
        assert!(!script.contains("querySelectorAll('a[href^=\"#\"]')"));
        assert!(script.contains(
            "act.addEventListener('click',function(e){e.preventDefault();e.stopPropagation();window.open(c.dataset.href||'#','_blank');});"
        ));
    }
}
