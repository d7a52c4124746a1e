//! Embedded pandoc page template
//!
//! The template carries exactly one `$title$` and one `$body$` placeholder
//! for pandoc, plus one literal TOC placeholder that the post-processing
//! stage substitutes. The navigation, theme-toggle and selection-share
//! scripts are opaque client presentation, outside the conversion contract.

/// Default document title passed to pandoc as metadata.
pub const DEFAULT_TITLE: &str = "Formula Student Korea 차량기술규정";

/// Pandoc HTML5 template written to a sibling file before invocation.
pub const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>$title$</title>
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Noto+Sans+KR:wght@400;500;700&family=Noto+Serif+KR:wght@400;700&display=swap" rel="stylesheet">
  <link rel="stylesheet" href="style.css">
  <script>
    MathJax = {
      tex: {
        inlineMath: [['$$', '$$'], ['\\(', '\\)']],
        displayMath: [['\\[', '\\]']]
      }
    };
  </script>
  <script src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
</head>
<body>
  <nav id="toc">
    <div class="toc-header">목차</div>
    <div class="toc-content">
      <!-- TOC_PLACEHOLDER -->
    </div>
  </nav>
  <button id="toc-toggle" aria-label="Toggle TOC">☰</button>
  <button id="theme-toggle" aria-label="Toggle Dark Mode">🌙</button>
  <button id="share-selection">🔗 링크 복사</button>
  <main id="content">
$body$
  </main>
  <script>
    // TOC Toggle
    const tocToggle = document.getElementById('toc-toggle');
    const toc = document.getElementById('toc');
    tocToggle.addEventListener('click', () => {
      toc.classList.toggle('open');
    });
    // Close TOC when clicking a link on mobile
    toc.querySelectorAll('a').forEach(link => {
      link.addEventListener('click', () => {
        if (window.innerWidth <= 1024) {
          toc.classList.remove('open');
        }
      });
    });

    // Dark Mode Toggle
    const themeToggle = document.getElementById('theme-toggle');
    const html = document.documentElement;

    // Check saved preference or system preference
    const savedTheme = localStorage.getItem('theme');
    const systemDark = window.matchMedia('(prefers-color-scheme: dark)').matches;

    if (savedTheme === 'dark' || (!savedTheme && systemDark)) {
      html.setAttribute('data-theme', 'dark');
      themeToggle.textContent = '☀️';
    }

    themeToggle.addEventListener('click', () => {
      const isDark = html.getAttribute('data-theme') === 'dark';
      if (isDark) {
        html.removeAttribute('data-theme');
        localStorage.setItem('theme', 'light');
        themeToggle.textContent = '🌙';
      } else {
        html.setAttribute('data-theme', 'dark');
        localStorage.setItem('theme', 'dark');
        themeToggle.textContent = '☀️';
      }
    });

    // Text Selection Share Link
    const shareBtn = document.getElementById('share-selection');
    let selectedText = '';

    document.addEventListener('mouseup', (e) => {
      setTimeout(() => {
        const selection = window.getSelection();
        const text = selection.toString().trim();

        if (text.length > 3 && text.length < 200) {
          selectedText = text;
          const range = selection.getRangeAt(0);
          const rect = range.getBoundingClientRect();

          shareBtn.style.display = 'block';
          shareBtn.style.left = (rect.left + window.scrollX + rect.width / 2 - shareBtn.offsetWidth / 2) + 'px';
          shareBtn.style.top = (rect.top + window.scrollY - 40) + 'px';
          shareBtn.textContent = '🔗 링크 복사';
          shareBtn.classList.remove('copied');
        } else {
          shareBtn.style.display = 'none';
        }
      }, 10);
    });

    document.addEventListener('mousedown', (e) => {
      if (e.target !== shareBtn) {
        shareBtn.style.display = 'none';
      }
    });

    shareBtn.addEventListener('click', async () => {
      if (!selectedText) return;

      // Create URL with text fragment
      const baseUrl = window.location.href.split('#')[0];
      const encodedText = encodeURIComponent(selectedText);
      const url = baseUrl + '#:~:text=' + encodedText;

      try {
        await navigator.clipboard.writeText(url);
        shareBtn.textContent = '✓ 복사됨';
        shareBtn.classList.add('copied');
        setTimeout(() => {
          shareBtn.style.display = 'none';
        }, 1500);
      } catch (err) {
        // Fallback for older browsers
        const textarea = document.createElement('textarea');
        textarea.value = url;
        document.body.appendChild(textarea);
        textarea.select();
        document.execCommand('copy');
        document.body.removeChild(textarea);
        shareBtn.textContent = '✓ 복사됨';
        shareBtn.classList.add('copied');
        setTimeout(() => {
          shareBtn.style.display = 'none';
        }, 1500);
      }
    });

    // Highlight text from URL fragment on page load
    (function() {
      const hash = window.location.hash;
      if (hash.includes(':~:text=')) {
        const textToFind = decodeURIComponent(hash.split(':~:text=')[1]);
        if (textToFind) {
          const walker = document.createTreeWalker(
            document.getElementById('content'),
            NodeFilter.SHOW_TEXT,
            null,
            false
          );

          let node;
          while (node = walker.nextNode()) {
            const idx = node.textContent.indexOf(textToFind);
            if (idx !== -1) {
              const range = document.createRange();
              range.setStart(node, idx);
              range.setEnd(node, idx + textToFind.length);

              const highlight = document.createElement('mark');
              highlight.className = 'text-highlight';
              range.surroundContents(highlight);

              highlight.scrollIntoView({ behavior: 'smooth', block: 'center' });
              break;
            }
          }
        }
      }
    })();
  </script>
</body>
</html>
"##;
