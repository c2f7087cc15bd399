use dioxus::prelude::*;

/// Stylesheet shared by every page, injected once by the platform `App`.
#[component]
pub fn ConsoleStyles() -> Element {
    rsx! {
        style {
            r#"
            body {{
                margin: 0;
                background: #f3f4f6;
                font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
                color: #1f2937;
            }}

            .navbar {{
                display: flex;
                justify-content: space-between;
                align-items: center;
                padding: 1rem 2rem;
                background: #2563eb;
                color: white;
            }}

            .navbar a {{
                color: white;
                text-decoration: none;
                margin-right: 1rem;
            }}

            .navbar a:hover {{
                text-decoration: underline;
            }}

            .navbar-brand {{
                font-size: 1.25rem;
                font-weight: 700;
            }}

            .navbar-welcome {{
                margin-right: 1rem;
            }}

            .content {{
                max-width: 64rem;
                margin: 0 auto;
                padding: 1rem;
            }}

            .notice {{
                padding: 1rem;
                border-radius: 4px;
                margin-bottom: 1rem;
            }}

            .notice-message {{
                background: #dcfce7;
                color: #15803d;
            }}

            .notice-error {{
                background: #fee2e2;
                color: #b91c1c;
            }}

            .card {{
                background: white;
                padding: 1.5rem;
                border-radius: 4px;
                box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
            }}

            .card-narrow {{
                max-width: 28rem;
                margin: 0 auto;
            }}

            .field {{
                margin-bottom: 1rem;
            }}

            .field label {{
                display: block;
                color: #374151;
                margin-bottom: 0.25rem;
            }}

            .field input, .field select {{
                width: 100%;
                padding: 0.5rem;
                border: 1px solid #d1d5db;
                border-radius: 4px;
                box-sizing: border-box;
            }}

            .btn {{
                padding: 0.5rem 1rem;
                border: none;
                border-radius: 4px;
                color: white;
                background: #3b82f6;
                cursor: pointer;
            }}

            .btn:disabled {{
                background: #9ca3af;
                cursor: not-allowed;
            }}

            .btn-success {{
                background: #22c55e;
            }}

            .btn-danger {{
                background: #ef4444;
            }}

            .pending-list {{
                list-style: none;
                padding: 0;
            }}

            .pending-list li {{
                display: flex;
                justify-content: space-between;
                align-items: center;
                padding: 0.5rem;
                border-bottom: 1px solid #e5e7eb;
            }}

            .audit-table {{
                width: 100%;
                border-collapse: collapse;
            }}

            .audit-table th {{
                background: #e5e7eb;
            }}

            .audit-table th, .audit-table td {{
                padding: 0.5rem;
                text-align: left;
                border-bottom: 1px solid #e5e7eb;
            }}
            "#
        }
    }
}
